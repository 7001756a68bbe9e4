use crate::filter::{filter_positions, FilteredPosition};
use crate::network::{Network, Substation, VoltageLevel};
use std::sync::Arc;

/// Row is one line of the explorer list.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Row<'a> {
    /// Substation header.
    Substation(&'a Substation),
    /// Voltage level shown below its owning substation header.
    VoltageLevel(&'a Substation, &'a VoltageLevel),
}

impl<'a> Row<'a> {
    /// The substation the row belongs to.
    pub fn substation(&self) -> &'a Substation {
        match *self {
            Row::Substation(s) => s,
            Row::VoltageLevel(s, _) => s,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Row::Substation(_))
    }
}

/// ExplorerIndex is the filtered and sorted view of a network, flattened
/// into rows: each kept substation contributes one header row followed by
/// one row per kept voltage level.
///
/// The index is rebuilt from scratch whenever the network, the filter or
/// the display mode changes.
#[derive(Clone, Debug)]
pub struct ExplorerIndex {
    network: Arc<Network>,
    filter: String,
    use_name: bool,

    entries: Vec<FilteredPosition>,

    // First row of each entry, ascending.
    offsets: Vec<usize>,
    row_count: usize,
}

impl Default for ExplorerIndex {
    fn default() -> Self {
        Self::build(Arc::new(Network::default()), None, false)
    }
}

impl ExplorerIndex {
    pub fn build(network: Arc<Network>, filter: Option<&str>, use_name: bool) -> Self {
        let entries = filter_positions(network.substations(), filter, use_name);

        let mut offsets = Vec::with_capacity(entries.len());
        let mut row_count = 0;
        for (_, vls) in &entries {
            offsets.push(row_count);
            row_count += 1 + vls.len();
        }

        log::debug!(
            "explorer index: {} substations, {} rows",
            entries.len(),
            row_count
        );

        Self {
            network,
            filter: filter.unwrap_or_default().to_string(),
            use_name,
            entries,
            offsets,
            row_count,
        }
    }

    /// Rebuilds against the same network with a new filter and display mode.
    pub fn rebuild(&self, filter: Option<&str>, use_name: bool) -> Self {
        Self::build(self.network.clone(), filter, use_name)
    }

    pub fn network(&self) -> &Arc<Network> {
        &self.network
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn use_name(&self) -> bool {
        self.use_name
    }

    /// Number of kept substations (header rows).
    pub fn substation_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of rows: one per kept substation plus one per kept
    /// voltage level.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// First row of each kept substation, in display order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Resolves a row by binary search over the substation offsets.
    pub fn row_at(&self, index: usize) -> Option<Row<'_>> {
        if index >= self.row_count {
            return None;
        }
        let k = self.entry_of(index);
        let (i, vls) = &self.entries[k];
        let s = &self.network.substations()[*i];

        match index - self.offsets[k] {
            0 => Some(Row::Substation(s)),
            n => Some(Row::VoltageLevel(s, &s.voltage_levels[vls[n - 1]])),
        }
    }

    /// Position in display order of the substation owning `index`.
    /// Expects `index < row_count()`.
    pub(crate) fn entry_of(&self, index: usize) -> usize {
        self.offsets.partition_point(|&o| o <= index) - 1
    }

    /// Kept substations and voltage levels in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&Substation, Vec<&VoltageLevel>)> + '_ {
        let substations = self.network.substations();
        self.entries.iter().map(move |(i, vls)| {
            let s = &substations[*i];
            (s, vls.iter().map(|&j| &s.voltage_levels[j]).collect())
        })
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.iter().flat_map(|(s, vls)| {
            std::iter::once(Row::Substation(s))
                .chain(vls.into_iter().map(move |vl| Row::VoltageLevel(s, vl)))
        })
    }
}
