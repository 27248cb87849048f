//! `<audio>` element media surface

use crate::error::SurfaceError;
use crate::surface::{MediaSurface, StartRequest, SurfaceEvents};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Media surface backed by a detached `HtmlAudioElement`
pub struct AudioElementSurface {
    element: HtmlAudioElement,
    events: Option<SurfaceEvents>,
    on_time_update: Option<Closure<dyn FnMut()>>,
    on_ended: Option<Closure<dyn FnMut()>>,
}

impl AudioElementSurface {
    pub fn new() -> Result<Self, SurfaceError> {
        let element = HtmlAudioElement::new().map_err(|_| SurfaceError::Unavailable)?;
        Ok(Self {
            element,
            events: None,
            on_time_update: None,
            on_ended: None,
        })
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

fn describe(error: &JsValue) -> String {
    match error.dyn_ref::<js_sys::Error>() {
        Some(e) => format!("{}: {}", String::from(e.name()), String::from(e.message())),
        None => error.as_string().unwrap_or_else(|| format!("{error:?}")),
    }
}

impl MediaSurface for AudioElementSurface {
    fn set_source(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.element.set_src(url);
        Ok(())
    }

    fn load(&mut self) -> Result<(), SurfaceError> {
        self.element.load();
        Ok(())
    }

    fn play(&mut self, request: StartRequest) -> Result<(), SurfaceError> {
        let promise = self
            .element
            .play()
            .map_err(|e| SurfaceError::Backend(describe(&e)))?;

        // Autoplay policy refusals arrive as a rejected promise
        let events = self.events.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(error) = JsFuture::from(promise).await {
                if let Some(events) = events {
                    events.start_rejected(request, &SurfaceError::Rejected(describe(&error)));
                }
            }
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SurfaceError> {
        self.element
            .pause()
            .map_err(|e| SurfaceError::Backend(describe(&e)))
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position(&mut self, secs: f64) {
        self.element.set_current_time(secs);
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, level: f64) {
        self.element.set_volume(level.clamp(0.0, 1.0));
    }

    fn subscribe(&mut self, events: SurfaceEvents) {
        self.unsubscribe();

        let element = self.element.clone();
        let time_events = events.clone();
        let on_time_update = Closure::wrap(Box::new(move || {
            time_events.time_update(element.current_time());
        }) as Box<dyn FnMut()>);

        let ended_events = events.clone();
        let on_ended = Closure::wrap(Box::new(move || {
            ended_events.ended();
        }) as Box<dyn FnMut()>);

        self.element
            .set_ontimeupdate(Some(on_time_update.as_ref().unchecked_ref()));
        self.element.set_onended(Some(on_ended.as_ref().unchecked_ref()));

        self.on_time_update = Some(on_time_update);
        self.on_ended = Some(on_ended);
        self.events = Some(events);
    }

    fn unsubscribe(&mut self) {
        self.element.set_ontimeupdate(None);
        self.element.set_onended(None);
        self.on_time_update = None;
        self.on_ended = None;
        self.events = None;
    }
}

impl Drop for AudioElementSurface {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
