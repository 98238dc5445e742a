use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_net::http::Request;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlElement};
use yew::prelude::*;

use crate::globe::{
    CountryFeature, DatasetState, FeatureCollection, GlobeAppearance, GlobeController,
    GlobeError, GlobeRenderer, PointOfView, Region,
};

const BOUNDARY_DATASET_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";
const FALLBACK_GLOBE_RADIUS: f64 = 100.0;

type ControllerSlot = RefCell<Option<GlobeController<JsGlobe>>>;

fn js_error(value: JsValue) -> GlobeError {
    GlobeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn call_method(target: &JsValue, name: &'static str, args: &[JsValue]) -> Result<JsValue, GlobeError> {
    let method = Reflect::get(target, &JsValue::from_str(name)).map_err(js_error)?;
    let method = method
        .dyn_into::<Function>()
        .map_err(|_| GlobeError::MissingMethod(name))?;
    let args: Array = args.iter().collect();
    method.apply(target, &args).map_err(js_error)
}

fn set_field(target: &JsValue, name: &str, value: JsValue) -> Result<(), GlobeError> {
    Reflect::set(target, &JsValue::from_str(name), &value)
        .map(|_| ())
        .map_err(js_error)
}

/// A globe.gl instance bound to one element.
pub struct JsGlobe {
    instance: JsValue,
    features: JsValue,
    callbacks: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl JsGlobe {
    pub fn mount(element: &HtmlElement, features: &[CountryFeature]) -> Result<Self, GlobeError> {
        let win: JsValue = window().ok_or(GlobeError::MissingMethod("window"))?.into();
        let factory = Reflect::get(&win, &JsValue::from_str("Globe"))
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(|_| GlobeError::MissingMethod("Globe"))?;
        let attach = factory
            .call0(&JsValue::NULL)
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(|_| GlobeError::MissingMethod("Globe()"))?;
        let instance = attach.call1(&JsValue::NULL, element).map_err(js_error)?;

        let features = serde_json::to_string(features)
            .map_err(|error| GlobeError::Decode(error.to_string()))?;
        let features = js_sys::JSON::parse(&features).map_err(js_error)?;

        Ok(Self {
            instance,
            features,
            callbacks: Vec::new(),
        })
    }

    /// Registers `handler` for one of globe.gl's `on*` hooks.
    pub fn on(
        &mut self,
        hook: &'static str,
        handler: impl FnMut(JsValue) + 'static,
    ) -> Result<(), GlobeError> {
        let callback = Closure::<dyn FnMut(JsValue)>::new(handler);
        call_method(&self.instance, hook, &[callback.as_ref().clone()])?;
        self.callbacks.push(callback);
        Ok(())
    }

    fn set(&self, name: &'static str, value: JsValue) -> Result<(), GlobeError> {
        call_method(&self.instance, name, &[value]).map(|_| ())
    }
}

impl GlobeRenderer for JsGlobe {
    fn render(
        &mut self,
        width: f64,
        height: f64,
        appearance: &GlobeAppearance,
    ) -> Result<(), GlobeError> {
        self.set("width", width.into())?;
        self.set("height", height.into())?;
        self.set("backgroundColor", appearance.background_color.into())?;
        self.set("globeImageUrl", appearance.image_url.into())?;
        self.set("showGlobe", true.into())?;
        self.set("showAtmosphere", true.into())?;
        self.set("atmosphereColor", appearance.atmosphere_color.into())?;
        self.set("atmosphereAltitude", appearance.atmosphere_altitude.into())?;

        if let Some(hex) = &appearance.hex_polygons {
            self.set("hexPolygonsData", self.features.clone())?;
            self.set("hexPolygonGeoJsonGeometry", "geometry".into())?;
            self.set("hexPolygonColor", JsValue::from_str(hex.color))?;
            self.set("hexPolygonResolution", f64::from(hex.resolution).into())?;
            self.set("hexPolygonMargin", hex.margin.into())?;
            self.set("hexPolygonUseDots", false.into())?;
            self.set("hexPolygonAltitude", hex.altitude.into())?;
        }

        self.set("enablePointerInteraction", true.into())
    }

    fn focus(&mut self, pov: PointOfView, duration_ms: u32) -> Result<(), GlobeError> {
        let target = Object::new();
        set_field(&target, "lat", pov.lat.into())?;
        set_field(&target, "lng", pov.lng.into())?;
        set_field(&target, "altitude", pov.altitude.into())?;

        call_method(
            &self.instance,
            "pointOfView",
            &[target.into(), f64::from(duration_ms).into()],
        )
        .map(|_| ())
    }

    fn lock_camera_distance(&mut self, altitude: f64) -> Result<(), GlobeError> {
        let controls = call_method(&self.instance, "controls", &[])?;
        if controls.is_undefined() || controls.is_null() {
            return Err(GlobeError::MissingMethod("controls"));
        }

        let radius = call_method(&self.instance, "getGlobeRadius", &[])?
            .as_f64()
            .unwrap_or(FALLBACK_GLOBE_RADIUS);
        let distance = radius * (1.0 + altitude);

        set_field(&controls, "enableZoom", false.into())?;
        set_field(&controls, "enablePan", false.into())?;
        set_field(&controls, "minDistance", distance.into())?;
        set_field(&controls, "maxDistance", distance.into())
    }
}

impl Drop for JsGlobe {
    fn drop(&mut self) {
        if let Err(error) = call_method(&self.instance, "_destructor", &[]) {
            log::debug!("globe teardown: {error}");
        }
    }
}

async fn fetch_boundaries() -> Result<Vec<CountryFeature>, GlobeError> {
    let response = Request::get(BOUNDARY_DATASET_URL)
        .send()
        .await
        .map_err(|error| GlobeError::Fetch(error.to_string()))?;

    if !response.ok() {
        return Err(GlobeError::Fetch(format!("HTTP {}", response.status())));
    }

    let body = response
        .text()
        .await
        .map_err(|error| GlobeError::Fetch(error.to_string()))?;
    Ok(FeatureCollection::parse(&body)?.features)
}

fn admin_name(polygon: &JsValue) -> Option<String> {
    let properties = Reflect::get(polygon, &JsValue::from_str("properties")).ok()?;
    Reflect::get(&properties, &JsValue::from_str("ADMIN"))
        .ok()?
        .as_string()
}

fn with_controller<T>(
    slot: &Weak<ControllerSlot>,
    f: impl FnOnce(&mut GlobeController<JsGlobe>) -> T,
) -> Option<T> {
    let slot = slot.upgrade()?;
    let mut controller = slot.try_borrow_mut().ok()?;
    controller.as_mut().map(f)
}

fn mount_globe(
    element: &HtmlElement,
    features: &[CountryFeature],
    width: f64,
    height: f64,
    appearance: &GlobeAppearance,
    slot: Weak<ControllerSlot>,
    on_select: Callback<Region>,
) -> Result<GlobeController<JsGlobe>, GlobeError> {
    let mut globe = JsGlobe::mount(element, features)?;
    globe.render(width, height, appearance)?;

    let ready_slot = slot.clone();
    globe.on("onGlobeReady", move |_| {
        with_controller(&ready_slot, GlobeController::on_ready);
    })?;

    if appearance.hex_polygons.is_some() {
        globe.on("onHexPolygonClick", move |polygon| {
            let Some(name) = admin_name(&polygon) else {
                return;
            };
            if let Some(Some(region)) =
                with_controller(&slot, |controller| controller.select_admin_name(&name))
            {
                on_select.emit(region);
            }
        })?;
    }

    Ok(GlobeController::new(globe))
}

#[derive(Properties, PartialEq)]
pub struct GlobeWidgetProps {
    pub width: f64,
    pub height: f64,
    pub appearance: GlobeAppearance,
    #[prop_or_default]
    pub selected: Option<Region>,
    #[prop_or_default]
    pub on_select: Callback<Region>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(GlobeWidget)]
pub fn globe_widget(props: &GlobeWidgetProps) -> Html {
    let container = use_node_ref();
    let controller = use_mut_ref(|| None::<GlobeController<JsGlobe>>);
    let wants_dataset = props.appearance.hex_polygons.is_some();
    let dataset = use_state(move || {
        if wants_dataset {
            DatasetState::Loading
        } else {
            DatasetState::Ready(Vec::new())
        }
    });
    let ready = dataset.features().is_some();

    {
        let dataset = dataset.clone();
        use_effect_with(wants_dataset, move |wants_dataset| {
            if *wants_dataset {
                spawn_local(async move {
                    match fetch_boundaries().await {
                        Ok(features) => {
                            log::debug!("loaded {} country boundaries", features.len());
                            dataset.set(DatasetState::Ready(features));
                        }
                        Err(error) => {
                            log::error!("Failed to fetch country data: {error}");
                            dataset.set(DatasetState::Failed);
                        }
                    }
                });
            }
            || ()
        });
    }

    {
        let container = container.clone();
        let controller = controller.clone();
        let dataset = dataset.clone();
        let on_select = props.on_select.clone();
        use_effect_with(
            (ready, props.width, props.height, props.appearance.clone()),
            move |(ready, width, height, appearance)| {
                if let (true, Some(element)) = (*ready, container.cast::<HtmlElement>()) {
                    let features = dataset.features().unwrap_or(&[]);
                    match mount_globe(
                        &element,
                        features,
                        *width,
                        *height,
                        appearance,
                        Rc::downgrade(&controller),
                        on_select,
                    ) {
                        Ok(mounted) => *controller.borrow_mut() = Some(mounted),
                        Err(error) => log::warn!("globe unavailable: {error}"),
                    }
                }

                move || {
                    let previous = controller.borrow_mut().take();
                    drop(previous);
                }
            },
        );
    }

    {
        let controller = controller.clone();
        use_effect_with(props.selected, move |selected| {
            if let Some(region) = *selected {
                if let Ok(mut slot) = controller.try_borrow_mut() {
                    if let Some(controller) = slot.as_mut() {
                        controller.focus_region(region);
                    }
                }
            }
            || ()
        });
    }

    let size_style = format!("width: {:.0}px; height: {:.0}px;", props.width, props.height);

    if !ready {
        return html! {
            <div class={classes!("globe-placeholder", props.class.clone())} style={size_style} aria-hidden="true">
                <div class="globe-spinner"></div>
            </div>
        };
    }

    html! {
        <div class={classes!("globe-frame", props.class.clone())}>
            <div ref={container} class="globe-canvas" style={size_style}></div>
        </div>
    }
}
