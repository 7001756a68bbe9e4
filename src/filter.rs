use crate::compare::IdentifiedComparator;
use crate::network::{Network, Substation, VoltageLevel};

/// A substation kept by the filter together with the voltage levels
/// shown below it, both sorted.
pub type FilteredSubstation<'a> = (&'a Substation, Vec<&'a VoltageLevel>);

/// Positions into the source collection: the substation position and the
/// positions of its kept voltage levels, in display order.
pub(crate) type FilteredPosition = (usize, Vec<usize>);

/// Filters and sorts substations and their voltage levels.
///
/// A substation is kept if `filter` is empty, if one of its voltage levels
/// matches or if the substation matches itself. In the last case all of
/// its voltage levels are kept, otherwise only the matching ones. Matching
/// is a case-insensitive substring test on the selected field (`name` when
/// `use_name` is set, `id` otherwise; a missing name matches as "").
///
/// Substations, and voltage levels within each substation, are stably
/// sorted by the same comparator. Taking a [`Network`] means ids have
/// already been checked to be present and unique.
pub fn filter_substations<'a>(
    network: &'a Network,
    filter: Option<&str>,
    use_name: bool,
) -> Vec<FilteredSubstation<'a>> {
    let substations = network.substations();
    filter_positions(substations, filter, use_name)
        .into_iter()
        .map(|(i, vls)| {
            let s = &substations[i];
            (s, vls.into_iter().map(|j| &s.voltage_levels[j]).collect())
        })
        .collect()
}

pub(crate) fn filter_positions(
    substations: &[Substation],
    filter: Option<&str>,
    use_name: bool,
) -> Vec<FilteredPosition> {
    let mut cmp = IdentifiedComparator::new(use_name);

    let entry = filter.map(str::to_lowercase).unwrap_or_default();

    let mut subs: Vec<FilteredPosition> = Vec::with_capacity(substations.len());
    for (i, s) in substations.iter().enumerate() {
        let all = || (0..s.voltage_levels.len()).collect::<Vec<usize>>();

        let vls = if entry.is_empty() {
            Some(all())
        } else {
            let matching: Vec<usize> = s
                .voltage_levels
                .iter()
                .enumerate()
                .filter(|(_, vl)| matches(cmp.key(*vl), &entry))
                .map(|(j, _)| j)
                .collect();
            if !matching.is_empty() {
                Some(matching)
            } else if matches(cmp.key(s), &entry) {
                Some(all())
            } else {
                None
            }
        };

        if let Some(vls) = vls {
            subs.push((i, vls));
        }
    }

    // sort_by is stable: ties keep provider order
    for (i, vls) in subs.iter_mut() {
        let levels = &substations[*i].voltage_levels;
        vls.sort_by(|&a, &b| cmp.compare(&levels[a], &levels[b]));
    }
    subs.sort_by(|(a, _), (b, _)| cmp.compare(&substations[*a], &substations[*b]));

    log::trace!(
        "filter {:?} (use_name={}) kept {} of {} substations",
        entry,
        use_name,
        subs.len(),
        substations.len()
    );

    subs
}

fn matches(key: &str, entry: &str) -> bool {
    key.to_lowercase().contains(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::{ids, paris_lyon, scenario_network};
    use anyhow::Result;

    #[test]
    fn test_no_filter_sorts_everything() {
        let network = scenario_network();
        let subs = filter_substations(&network, Some(""), false);

        assert_eq!(ids(&subs), vec![("S1", vec!["VL1a", "VL1b"]), ("S2", vec!["VL2a"])]);
    }

    #[test]
    fn test_none_filter_is_empty_filter() {
        let network = scenario_network();
        assert_eq!(
            filter_substations(&network, None, false),
            filter_substations(&network, Some(""), false)
        );
    }

    #[test]
    fn test_voltage_level_match() {
        let network = scenario_network();
        let subs = filter_substations(&network, Some("vl1a"), false);

        assert_eq!(ids(&subs), vec![("S1", vec!["VL1a"])]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let network = scenario_network();
        let lower = filter_substations(&network, Some("vl1a"), false);
        let upper = filter_substations(&network, Some("VL1A"), false);

        assert_eq!(lower, upper);
    }

    #[test]
    fn test_substation_match_keeps_all_voltage_levels() {
        let network = paris_lyon();
        let subs = filter_substations(&network, Some("lyon"), true);

        assert_eq!(ids(&subs), vec![("S2", vec!["VL2b", "VL2a"])]);
    }

    #[test]
    fn test_voltage_level_match_wins_over_substation_match() -> Result<()> {
        let network = Network::new(vec![Substation::new("S1")
            .with_voltage_level(VoltageLevel::new("S1_400", 400.0))
            .with_voltage_level(VoltageLevel::new("OTHER", 225.0))])?;

        let subs = filter_substations(&network, Some("s1"), false);
        assert_eq!(ids(&subs), vec![("S1", vec!["S1_400"])]);
        Ok(())
    }

    #[test]
    fn test_matching_substation_without_voltage_levels() -> Result<()> {
        let network = Network::new(vec![Substation::new("EMPTY"), Substation::new("OTHER")])?;

        let subs = filter_substations(&network, Some("emp"), false);
        assert_eq!(ids(&subs), vec![("EMPTY", vec![])]);
        Ok(())
    }

    #[test]
    fn test_country_is_not_matched() {
        let network = paris_lyon();
        let subs = filter_substations(&network, Some("france"), true);

        assert!(subs.is_empty());
    }

    #[test]
    fn test_toggle_resorts() {
        let network = paris_lyon();

        let by_id = filter_substations(&network, None, false);
        assert_eq!(by_id[0].0.id, "S1");
        assert_eq!(by_id[1].0.id, "S2");

        let by_name = filter_substations(&network, None, true);
        assert_eq!(by_name[0].0.id, "S2");
        assert_eq!(by_name[1].0.id, "S1");

        let lyon: Vec<&str> = by_name[0].1.iter().map(|vl| vl.id.as_str()).collect();
        assert_eq!(lyon, vec!["VL2b", "VL2a"]);
    }

    #[test]
    fn test_missing_name_matches_empty() -> Result<()> {
        let network = Network::new(vec![
            Substation::new("S1").with_voltage_level(VoltageLevel::new("VL1", 400.0)),
            Substation::new("S2")
                .with_name("Named")
                .with_voltage_level(VoltageLevel::new("VL2", 400.0).with_name("Named VL")),
        ])?;

        // S1 has no names at all: it only appears when no filter is set.
        let subs = filter_substations(&network, Some("vl"), true);
        assert_eq!(ids(&subs), vec![("S2", vec!["VL2"])]);

        let subs = filter_substations(&network, None, true);
        assert_eq!(ids(&subs), vec![("S1", vec!["VL1"]), ("S2", vec!["VL2"])]);
        Ok(())
    }

    #[test]
    fn test_ties_keep_input_order() -> Result<()> {
        let network = Network::new(vec![Substation::new("S1")
            .with_voltage_level(VoltageLevel::new("third", 63.0).with_name("same"))
            .with_voltage_level(VoltageLevel::new("first", 63.0).with_name("same"))
            .with_voltage_level(VoltageLevel::new("second", 63.0).with_name("same"))])?;

        let subs = filter_substations(&network, None, true);
        assert_eq!(ids(&subs), vec![("S1", vec!["third", "first", "second"])]);
        Ok(())
    }

    #[test]
    fn test_empty_collection() {
        let network = Network::default();
        assert!(filter_substations(&network, Some("x"), false).is_empty());
        assert!(filter_substations(&network, None, true).is_empty());
    }

    #[test]
    fn test_malformed_ids_never_reach_the_filter() {
        // Without validation both would collapse into the same row key.
        let blank = Network::new(vec![Substation::new(""), Substation::new("")]);
        assert!(blank.is_err());

        let duplicate = Network::new(vec![
            Substation::new("S1").with_voltage_level(VoltageLevel::new("VL", 400.0)),
            Substation::new("S1").with_voltage_level(VoltageLevel::new("VL", 225.0)),
        ]);
        assert!(duplicate.is_err());
    }
}
