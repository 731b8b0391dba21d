//! Request orchestration: configuration gate, validation, upstream fetch,
//! render, persist. The error taxonomy maps each phase to its own variant so
//! callers can translate outcomes without string matching.

use std::sync::Mutex;

use tracing::info;

use crate::config::Config;
use crate::foundation::error::{PinError, PinResult};
use crate::model::{RenderInput, RenderRequest};
use crate::output::{OutputSink, StoredImage};
use crate::pipeline::render_png;
use crate::text::font::FontResolver;
use crate::upstream::BaseImageSource;

/// Dimensions requested from the base-image collaborator; the pipeline
/// resizes to the output format afterward.
const BASE_IMAGE_WIDTH: u32 = 1024;
const BASE_IMAGE_HEIGHT: u32 = 1024;

/// Successful render result: where the PNG landed.
#[derive(Clone, Debug)]
pub struct RenderOutcome {
    pub image: StoredImage,
}

impl RenderOutcome {
    /// Servable path for the stored file under the configured prefix,
    /// e.g. `/static/generated_....png`.
    pub fn serving_path(&self, config: &Config) -> String {
        format!(
            "{}/static/{}",
            config.path_prefix.trim_end_matches('/'),
            self.image.filename
        )
    }
}

struct ServiceState {
    resolver: FontResolver,
    sink: OutputSink,
}

/// The render entry point, generic over the base-image producer.
///
/// Shared mutable resources (font cache, output directory, filename
/// registry) live behind one mutex so concurrent `handle` calls from
/// separate threads serialize on them; the rendering itself holds the lock
/// only because it shares the font cache.
pub struct RenderService<S: BaseImageSource> {
    config: Config,
    source: S,
    state: Mutex<ServiceState>,
}

impl<S: BaseImageSource> RenderService<S> {
    pub fn new(config: Config, source: S) -> Self {
        let state = ServiceState {
            resolver: FontResolver::new(&config.font_dir),
            sink: OutputSink::new(&config.output_dir, &config.fallback_dir),
        };
        Self {
            config,
            source,
            state: Mutex::new(state),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one request end to end. Errors are terminal; nothing is retried
    /// here beyond the collaborator's own internal poll loop.
    pub fn handle(&self, input: &RenderInput) -> PinResult<RenderOutcome> {
        if !self.config.render_enabled() {
            return Err(PinError::configuration(
                "render entry point is disabled: no upstream credential configured",
            ));
        }
        input.validate()?;

        info!(style = input.style.as_str(), "starting render");
        let base_image =
            self.source
                .generate(&input.image_prompt, BASE_IMAGE_WIDTH, BASE_IMAGE_HEIGHT)?;

        let request = RenderRequest {
            base_image,
            title: input.title.clone(),
            branding_text: input.branding_text.clone(),
            style: input.style,
        };

        let mut state = self
            .state
            .lock()
            .map_err(|_| PinError::render("service state lock poisoned"))?;
        let png = render_png(&request, &mut state.resolver)?;
        let image = state.sink.store(&png)?;
        info!(filename = %image.filename, "render complete");
        Ok(RenderOutcome { image })
    }

    /// Where a previously rendered filename landed, if this process made it.
    pub fn lookup(&self, filename: &str) -> Option<std::path::PathBuf> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.sink.lookup(filename).map(|p| p.to_path_buf()))
    }
}
