use crate::index::{ExplorerIndex, Row};
use crate::network::Network;
use crate::opt::ExplorerOpt;
use crate::viewmodel::ListViewModel;
use anyhow::{format_err, Result};
use std::sync::Arc;

/// Receives the user actions of the explorer list. Every callback gets
/// the id of the element acted upon; unimplemented callbacks are ignored.
pub trait ExplorerListener {
    /// A voltage level row was clicked.
    fn voltage_level_display_click(&self, _voltage_level_id: &str) {}

    /// A substation header was clicked.
    fn substation_display_click(&self, _substation_id: &str) {}

    /// The map should be centered on a substation.
    fn substation_focus(&self, _substation_id: &str) {}
}

/// NetworkExplorer owns the state behind the explorer list: the network
/// snapshot, the filter text and the options. Every change rebuilds the
/// index; nothing is carried over from the previous one.
pub struct NetworkExplorer {
    opt: ExplorerOpt,
    index: ExplorerIndex,
    listener: Option<Box<dyn ExplorerListener>>,
}

impl NetworkExplorer {
    pub fn new(opt: ExplorerOpt) -> Self {
        let index = ExplorerIndex::build(Arc::new(Network::default()), None, opt.use_name);
        Self {
            opt,
            index,
            listener: None,
        }
    }

    pub fn with_network(network: Network, opt: ExplorerOpt) -> Self {
        let mut explorer = Self::new(opt);
        explorer.set_network(network);
        explorer
    }

    pub fn set_listener(&mut self, listener: Box<dyn ExplorerListener>) {
        self.listener = Some(listener);
    }

    /// Replaces the network snapshot. The filter text is kept.
    pub fn set_network(&mut self, network: Network) {
        log::debug!(
            "network replaced: {} substations, {} voltage levels",
            network.substations().len(),
            network.voltage_level_count()
        );
        self.index = ExplorerIndex::build(
            Arc::new(network),
            Some(self.index.filter()),
            self.opt.use_name,
        );
    }

    /// Sets the filter text. Matching is case-insensitive.
    pub fn set_filter(&mut self, filter: &str) {
        let filter = filter.to_lowercase();
        self.index = self.index.rebuild(Some(&filter), self.opt.use_name);
    }

    pub fn set_use_name(&mut self, use_name: bool) {
        self.opt.use_name = use_name;
        self.index = self.index.rebuild(Some(self.index.filter()), use_name);
    }

    pub fn filter(&self) -> &str {
        self.index.filter()
    }

    pub fn opt(&self) -> &ExplorerOpt {
        &self.opt
    }

    pub fn index(&self) -> &ExplorerIndex {
        &self.index
    }

    pub fn view_model(&self) -> ListViewModel<'_> {
        ListViewModel::new(&self.index, &self.opt)
    }

    pub fn row_count(&self) -> usize {
        self.index.row_count()
    }

    pub fn row_at(&self, index: usize) -> Option<Row<'_>> {
        self.index.row_at(index)
    }

    /// Emits the display click of a row: `substation_display_click` for a
    /// header, `voltage_level_display_click` otherwise.
    pub fn click_row(&self, index: usize) -> Result<()> {
        let row = self.checked_row(index)?;
        match row {
            Row::Substation(s) => {
                log::debug!("substation display click: {}", s.id);
                if let Some(listener) = &self.listener {
                    listener.substation_display_click(&s.id);
                }
            }
            Row::VoltageLevel(_, vl) => {
                log::debug!("voltage level display click: {}", vl.id);
                if let Some(listener) = &self.listener {
                    listener.voltage_level_display_click(&vl.id);
                }
            }
        }
        Ok(())
    }

    /// Emits `substation_focus` for the substation a row belongs to.
    pub fn focus_row(&self, index: usize) -> Result<()> {
        let s = self.checked_row(index)?.substation();
        log::debug!("substation focus: {}", s.id);
        if let Some(listener) = &self.listener {
            listener.substation_focus(&s.id);
        }
        Ok(())
    }

    fn checked_row(&self, index: usize) -> Result<Row<'_>> {
        self.index.row_at(index).ok_or_else(|| {
            format_err!(
                "row index {} out of range (row count {})",
                index,
                self.index.row_count()
            )
        })
    }
}

impl Default for NetworkExplorer {
    fn default() -> Self {
        Self::new(ExplorerOpt::default())
    }
}
