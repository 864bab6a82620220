use crate::constants::{MOTION_BUFFER_HEIGHT, MOTION_BUFFER_WIDTH};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// `HTMLMediaElement.HAVE_ENOUGH_DATA`
const HAVE_ENOUGH_DATA: u16 = 4;

fn js_object(pairs: &[(&str, JsValue)]) -> js_sys::Object {
    let obj = js_sys::Object::new();
    for (k, v) in pairs {
        _ = js_sys::Reflect::set(&obj, &JsValue::from_str(k), v);
    }
    obj
}

/// A live low-resolution webcam feed drawn into an offscreen canvas.
pub struct Camera {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Camera {
    pub async fn open(document: &web::Document) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| anyhow::anyhow!("mediaDevices unavailable: {:?}", e))?;

        let video_size = js_object(&[
            ("width", JsValue::from(MOTION_BUFFER_WIDTH)),
            ("height", JsValue::from(MOTION_BUFFER_HEIGHT)),
        ]);
        let constraints: web::MediaStreamConstraints =
            js_object(&[("video", video_size.into())]).unchecked_into();
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| anyhow::anyhow!("getUserMedia error: {:?}", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("camera denied: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let video: web::HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        video.set_muted(true);
        video.set_autoplay(true);
        _ = video.set_attribute("playsinline", "");
        _ = video.set_attribute("style", "display: none");
        video.set_src_object(Some(&stream));
        _ = video.play();

        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        canvas.set_width(MOTION_BUFFER_WIDTH);
        canvas.set_height(MOTION_BUFFER_HEIGHT);
        let opts = js_object(&[("willReadFrequently", JsValue::TRUE)]);
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context_with_context_options("2d", &opts)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context for motion buffer"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        // Mobile browsers only decode attached video.
        if let Some(body) = document.body() {
            _ = body.append_child(&video);
        }
        Ok(Self { stream, video, ctx })
    }

    /// RGBA pixels of the current frame, once the video has enough data.
    pub fn grab_frame(&self) -> Option<Vec<u8>> {
        if self.video.ready_state() != HAVE_ENOUGH_DATA {
            return None;
        }
        let (w, h) = (MOTION_BUFFER_WIDTH as f64, MOTION_BUFFER_HEIGHT as f64);
        self.ctx
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, w, h)
            .ok()?;
        let image = self.ctx.get_image_data(0.0, 0.0, w, h).ok()?;
        Some(image.data().0)
    }

    /// Stop every track so the browser releases the device, and detach the
    /// hidden video.
    pub fn stop(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        self.video.remove();
    }
}

#[derive(Default)]
enum Slot {
    #[default]
    Off,
    Opening,
    Live(Camera),
    /// Acquisition failed; not retried until motion control is toggled.
    Failed,
}

/// Owns the camera while motion control wants it.
#[derive(Clone, Default)]
pub struct CameraLink {
    slot: Rc<RefCell<Slot>>,
    wanted: Rc<Cell<bool>>,
}

impl CameraLink {
    /// Acquire or release the camera to match `wanted`. Returns `true` when
    /// a live camera was just released.
    pub fn sync(&self, wanted: bool, document: &web::Document) -> bool {
        self.wanted.set(wanted);
        let mut slot = self.slot.borrow_mut();
        let mut open = false;
        let mut released = false;
        *slot = match (wanted, std::mem::take(&mut *slot)) {
            (true, Slot::Off) => {
                open = true;
                Slot::Opening
            }
            (false, Slot::Live(cam)) => {
                cam.stop();
                log::info!("[camera] released");
                released = true;
                Slot::Off
            }
            (false, Slot::Failed) => Slot::Off,
            (_, unchanged) => unchanged,
        };
        drop(slot);
        if open {
            self.spawn_open(document.clone());
        }
        released
    }

    fn spawn_open(&self, document: web::Document) {
        let link = self.clone();
        spawn_local(async move {
            let result = Camera::open(&document).await;
            let mut slot = link.slot.borrow_mut();
            match result {
                Ok(cam) if link.wanted.get() => {
                    log::info!("[camera] live");
                    *slot = Slot::Live(cam);
                }
                Ok(cam) => {
                    // Motion control was switched off while the prompt was open.
                    cam.stop();
                    *slot = Slot::Off;
                }
                Err(e) => {
                    log::error!("[camera] {:?}", e);
                    *slot = if link.wanted.get() {
                        Slot::Failed
                    } else {
                        Slot::Off
                    };
                }
            }
        });
    }

    pub fn grab_frame(&self) -> Option<Vec<u8>> {
        match &*self.slot.borrow() {
            Slot::Live(cam) => cam.grab_frame(),
            _ => None,
        }
    }
}
