use crate::explorer::{ExplorerListener, NetworkExplorer};
use crate::network::Network;
use crate::opt::ExplorerOptBuilder;
use crate::viewmodel::RowView;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Forwards explorer actions to JavaScript callbacks.
struct JsListener {
    on_voltage_level_display_click: Option<js_sys::Function>,
    on_substation_display_click: Option<js_sys::Function>,
    on_substation_focus: Option<js_sys::Function>,
}

fn call(callback: &Option<js_sys::Function>, id: &str) {
    if let Some(f) = callback {
        if let Err(err) = f.call1(&JsValue::NULL, &JsValue::from_str(id)) {
            log::error!("explorer callback failed: {:?}", err);
        }
    }
}

impl ExplorerListener for JsListener {
    fn voltage_level_display_click(&self, voltage_level_id: &str) {
        call(&self.on_voltage_level_display_click, voltage_level_id);
    }

    fn substation_display_click(&self, substation_id: &str) {
        call(&self.on_substation_display_click, substation_id);
    }

    fn substation_focus(&self, substation_id: &str) {
        call(&self.on_substation_focus, substation_id);
    }
}

/// Explorer state exposed to the browser host.
#[wasm_bindgen(js_name = NetworkExplorer)]
pub struct WasmExplorer {
    inner: NetworkExplorer,
}

#[wasm_bindgen(js_class = NetworkExplorer)]
impl WasmExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new(use_name: bool) -> Result<WasmExplorer, JsError> {
        let opt = ExplorerOptBuilder::default()
            .use_name(use_name)
            .build()
            .map_err(js_error)?;
        Ok(Self {
            inner: NetworkExplorer::new(opt),
        })
    }

    /// Replaces the network with a JSON array of substations.
    #[wasm_bindgen(js_name = setNetwork)]
    pub fn set_network(&mut self, json: &str) -> Result<(), JsError> {
        let network = Network::from_json(json).map_err(js_error)?;
        self.inner.set_network(network);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&mut self, filter: &str) {
        self.inner.set_filter(filter);
    }

    #[wasm_bindgen(js_name = setUseName)]
    pub fn set_use_name(&mut self, use_name: bool) {
        self.inner.set_use_name(use_name);
    }

    #[wasm_bindgen(js_name = setListener)]
    pub fn set_listener(
        &mut self,
        on_voltage_level_display_click: Option<js_sys::Function>,
        on_substation_display_click: Option<js_sys::Function>,
        on_substation_focus: Option<js_sys::Function>,
    ) {
        self.inner.set_listener(Box::new(JsListener {
            on_voltage_level_display_click,
            on_substation_display_click,
            on_substation_focus,
        }));
    }

    #[wasm_bindgen(js_name = rowCount)]
    pub fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    #[wasm_bindgen(js_name = totalHeight)]
    pub fn total_height(&self) -> f64 {
        self.inner.view_model().total_height()
    }

    pub fn row(&self, index: usize) -> Result<RowView, JsError> {
        self.inner
            .view_model()
            .row(index)
            .ok_or_else(|| JsError::new(&format!("row index {} out of range", index)))
    }

    #[wasm_bindgen(js_name = clickRow)]
    pub fn click_row(&self, index: usize) -> Result<(), JsError> {
        self.inner.click_row(index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = focusRow)]
    pub fn focus_row(&self, index: usize) -> Result<(), JsError> {
        self.inner.focus_row(index).map_err(js_error)
    }
}
