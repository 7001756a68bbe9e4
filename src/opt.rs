use derive_builder::Builder;

/// Height of a voltage level row (px).
pub const ITEM_HEIGHT: f64 = 48.0;

/// Height of a substation header row (px).
pub const HEADER_HEIGHT: f64 = ITEM_HEIGHT * 3.0 / 4.0;

/// Explorer options.
///
/// ```
/// use netexplorer::ExplorerOptBuilder;
///
/// let opt = ExplorerOptBuilder::default()
///     .use_name(true)
///     .overscan(4)
///     .build()
///     .unwrap();
/// assert_eq!(opt.item_height, 48.0);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct ExplorerOpt {
    /// Sort, match and display elements by name instead of id.
    pub use_name: bool,

    /// Height of a voltage level row.
    pub item_height: f64,

    /// Height of a substation header row.
    pub header_height: f64,

    /// Number of rows rendered above and below the viewport.
    pub overscan: usize,
}

impl Default for ExplorerOpt {
    fn default() -> Self {
        Self {
            use_name: false,
            item_height: ITEM_HEIGHT,
            header_height: HEADER_HEIGHT,
            overscan: 2,
        }
    }
}

impl ExplorerOptBuilder {
    fn validate(&self) -> Result<(), String> {
        for (field, height) in [
            ("item_height", self.item_height),
            ("header_height", self.header_height),
        ] {
            if let Some(h) = height {
                if !h.is_finite() || h <= 0.0 {
                    return Err(format!("{} must be positive and finite ({})", field, h));
                }
            }
        }
        Ok(())
    }
}
