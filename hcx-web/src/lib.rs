/// HCX Web - WASM bridge for the housing complex layout
///
/// Generates the layout inside WebAssembly and hands it to JavaScript as JSON,
/// together with the per-frame camera pose. The page owns every rendering
/// handle; this side only holds data and the animation clock.
use hcx_core::{
    build_housing_complex, config::SKY_COLOR, AnimationState, Camera, ComplexConfig, SceneLayout,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("no browser window available")]
    NoWindow,

    #[error("layout serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("scene has been disposed")]
    Disposed,
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[wasm_bindgen]
pub struct WebScene {
    layout: Option<SceneLayout>,
    animation: AnimationState,
}

#[wasm_bindgen]
impl WebScene {
    /// Generate a complex with trees placed from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebScene {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let layout = build_housing_complex(&ComplexConfig::default(), &mut rng);
        WebScene {
            layout: Some(layout),
            animation: AnimationState::new(Camera::default()),
        }
    }

    /// The whole layout as JSON
    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsValue> {
        Ok(self.to_json()?)
    }

    #[wasm_bindgen(js_name = primitiveCount)]
    pub fn primitive_count(&self) -> usize {
        self.layout.as_ref().map_or(0, SceneLayout::len)
    }

    #[wasm_bindgen(js_name = lightCount)]
    pub fn light_count(&self) -> usize {
        self.layout.as_ref().map_or(0, |layout| layout.lights.len())
    }

    #[wasm_bindgen(js_name = backgroundColor)]
    pub fn background_color(&self) -> u32 {
        SKY_COLOR
    }

    /// Advance one frame and return `[cam_x, cam_y, cam_z, target_x, target_y, target_z]`.
    pub fn tick(&mut self) -> Vec<f32> {
        self.animation.tick();
        let camera = &self.animation.camera;
        vec![
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
        ]
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.animation.camera.set_viewport(width, height);
    }

    /// Match the camera aspect to the browser window.
    #[wasm_bindgen(js_name = fitToWindow)]
    pub fn fit_to_window(&mut self) -> Result<(), JsValue> {
        let (width, height) = window_size()?;
        self.resize(width, height);
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.animation.camera.aspect
    }

    /// Stop the animation and drop the layout. Later calls are no-ops.
    pub fn dispose(&mut self) {
        self.animation.stop();
        self.layout = None;
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.is_running
    }
}

impl WebScene {
    pub fn layout(&self) -> Option<&SceneLayout> {
        self.layout.as_ref()
    }

    fn to_json(&self) -> Result<String, WebError> {
        let layout = self.layout.as_ref().ok_or(WebError::Disposed)?;
        Ok(serde_json::to_string(layout)?)
    }
}

fn window_size() -> Result<(u32, u32), WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as u32)
            .ok_or(WebError::NoWindow)
    };
    Ok((
        dimension(window.inner_width())?,
        dimension(window.inner_height())?,
    ))
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcx_core::Part;

    #[test]
    fn test_same_seed_same_layout() {
        let a = WebScene::new(7);
        let b = WebScene::new(7);
        assert_eq!(a.layout(), b.layout());
        assert_eq!(a.primitive_count(), 230);
        assert_eq!(a.light_count(), 14);
        assert_eq!(a.layout().map(|l| l.count(Part::TreeTrunk)), Some(8));
    }

    #[test]
    fn test_layout_json() {
        let scene = WebScene::new(1);
        let json = scene.to_json().unwrap();
        let back: SceneLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), scene.primitive_count());
    }

    #[test]
    fn test_tick_follows_orbit() {
        let mut scene = WebScene::new(1);
        let pose = scene.tick();
        assert_eq!(pose.len(), 6);
        assert_eq!(&pose[3..], &[0.0, 15.0, 0.0]);
        let radius = (pose[0] * pose[0] + pose[2] * pose[2]).sqrt();
        assert!((radius - 35.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_keeps_layout() {
        let mut scene = WebScene::new(3);
        let count = scene.primitive_count();
        scene.resize(1600, 800);
        assert!((scene.aspect() - 2.0).abs() < 1e-6);
        assert_eq!(scene.primitive_count(), count);
    }

    #[test]
    fn test_dispose_twice() {
        let mut scene = WebScene::new(3);
        scene.dispose();
        scene.dispose();
        assert!(!scene.is_running());
        assert_eq!(scene.primitive_count(), 0);
        assert!(matches!(scene.to_json(), Err(WebError::Disposed)));
    }
}
