//! The base-image collaborator: a text prompt goes in, raw image bytes come
//! out. Treated as a black box with its own submit-then-poll contract.

use crate::foundation::error::{PinError, PinResult};

/// Capability seam for the base-image producer, so the service can run
/// against a scripted source in tests.
pub trait BaseImageSource {
    fn generate(&self, prompt: &str, width: u32, height: u32) -> PinResult<Vec<u8>>;
}

#[cfg(feature = "upstream")]
pub use client::UpstreamImageClient;

#[cfg(feature = "upstream")]
mod client {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};
    use tracing::{info, warn};

    use super::BaseImageSource;
    use crate::foundation::error::{PinError, PinResult};

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    const POLL_TIMEOUT: Duration = Duration::from_secs(15);
    const POLL_INTERVAL: Duration = Duration::from_secs(2);
    const MAX_POLLS: u32 = 30;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TaskSubmission<'a> {
        task_type: &'static str,
        #[serde(rename = "taskUUID")]
        task_uuid: String,
        positive_prompt: &'a str,
        negative_prompt: &'static str,
        height: u32,
        width: u32,
        model: &'a str,
        steps: u32,
        #[serde(rename = "CFGScale")]
        cfg_scale: f32,
        output_type: [&'static str; 1],
        output_format: &'static str,
        number_results: u32,
        include_cost: bool,
    }

    #[derive(Deserialize)]
    struct SubmitResponse {
        #[serde(default)]
        data: Vec<TaskData>,
    }

    #[derive(Deserialize)]
    struct PollResponse {
        data: Option<TaskData>,
    }

    #[derive(Deserialize)]
    struct TaskData {
        #[serde(rename = "imageURL")]
        image_url: Option<String>,
        status: Option<String>,
        error: Option<String>,
        output: Option<TaskOutput>,
    }

    #[derive(Deserialize)]
    struct TaskOutput {
        #[serde(default)]
        images: Vec<TaskImage>,
    }

    #[derive(Deserialize)]
    struct TaskImage {
        url: Option<String>,
    }

    impl TaskData {
        fn resolved_url(&self) -> Option<&str> {
            if let Some(u) = self.image_url.as_deref() {
                return Some(u);
            }
            self.output
                .as_ref()
                .and_then(|o| o.images.first())
                .and_then(|i| i.url.as_deref())
        }
    }

    /// Blocking client for the task-based image generation API.
    pub struct UpstreamImageClient {
        base_url: String,
        api_key: String,
        model: String,
        http: reqwest::blocking::Client,
    }

    impl UpstreamImageClient {
        pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> PinResult<Self> {
            let http = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| PinError::upstream(format!("could not build http client: {e}")))?;
            Ok(Self {
                base_url: base_url.into().trim_end_matches('/').to_string(),
                api_key: api_key.into(),
                model: "rundiffusion:130@100".to_string(),
                http,
            })
        }

        pub fn with_model(mut self, model: impl Into<String>) -> Self {
            self.model = model.into();
            self
        }

        fn download(&self, url: &str) -> PinResult<Vec<u8>> {
            info!(%url, "downloading generated image");
            let resp = self
                .http
                .get(url)
                .send()
                .map_err(|e| PinError::upstream(format!("image download failed: {e}")))?;
            if !resp.status().is_success() {
                return Err(PinError::upstream(format!(
                    "failed to download generated image: {}",
                    resp.status().as_u16()
                )));
            }
            resp.bytes()
                .map(|b| b.to_vec())
                .map_err(|e| PinError::upstream(format!("image download read failed: {e}")))
        }

        fn poll_for_completion(&self, task_uuid: &str) -> PinResult<Vec<u8>> {
            for attempt in 0..MAX_POLLS {
                if attempt > 0 {
                    std::thread::sleep(POLL_INTERVAL);
                }
                info!(attempt = attempt + 1, max = MAX_POLLS, "polling task status");

                let resp = match self
                    .http
                    .get(format!("{}/tasks/{}", self.base_url, task_uuid))
                    .bearer_auth(&self.api_key)
                    .timeout(POLL_TIMEOUT)
                    .send()
                {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(%e, "poll request failed, retrying");
                        continue;
                    }
                };
                if !resp.status().is_success() {
                    warn!(status = resp.status().as_u16(), "poll returned non-success");
                    continue;
                }
                let body: PollResponse = match resp.json() {
                    Ok(b) => b,
                    Err(e) => {
                        warn!(%e, "poll response was not parseable");
                        continue;
                    }
                };
                let Some(task) = body.data else {
                    continue;
                };

                match task.status.as_deref() {
                    Some("completed") => {
                        let url = task.resolved_url().ok_or_else(|| {
                            PinError::upstream("no image URL found in completed task")
                        })?;
                        return self.download(url);
                    }
                    Some("failed") => {
                        let reason = task.error.unwrap_or_else(|| "unknown error".to_string());
                        return Err(PinError::upstream(format!("task failed: {reason}")));
                    }
                    other => {
                        info!(status = ?other, "task still in progress");
                    }
                }
            }
            Err(PinError::upstream(format!(
                "timed out waiting for task completion after {MAX_POLLS} attempts"
            )))
        }
    }

    impl BaseImageSource for UpstreamImageClient {
        fn generate(&self, prompt: &str, width: u32, height: u32) -> PinResult<Vec<u8>> {
            let task_uuid = crate::output::hex_nonce(32);
            info!(%task_uuid, "submitting image generation task");

            let payload = [TaskSubmission {
                task_type: "imageInference",
                task_uuid: task_uuid.clone(),
                positive_prompt: prompt,
                negative_prompt: "low quality, bad anatomy, distorted, blurry",
                height,
                width,
                model: &self.model,
                steps: 35,
                cfg_scale: 7.0,
                output_type: ["URL"],
                output_format: "JPEG",
                number_results: 1,
                include_cost: true,
            }];

            let resp = self
                .http
                .post(format!("{}/tasks", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .map_err(|e| PinError::upstream(format!("task submission failed: {e}")))?;

            let status = resp.status().as_u16();
            if status == 401 || status == 403 {
                return Err(PinError::upstream(format!(
                    "authentication failed, the credential may be invalid (status {status})"
                )));
            }
            if status != 200 {
                let body = resp.text().unwrap_or_default();
                return Err(PinError::upstream(format!(
                    "failed to create task (status {status}): {body}"
                )));
            }

            let body: SubmitResponse = resp
                .json()
                .map_err(|e| PinError::upstream(format!("task response was not parseable: {e}")))?;
            let Some(task) = body.data.first() else {
                return Err(PinError::upstream("task response contained no data"));
            };

            match task.resolved_url() {
                Some(url) => self.download(url),
                None => {
                    info!("no immediate image URL, polling for completion");
                    self.poll_for_completion(&task_uuid)
                }
            }
        }
    }
}

/// Convenience source that reads a local file, for offline rendering runs.
pub struct FileImageSource {
    path: std::path::PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BaseImageSource for FileImageSource {
    fn generate(&self, _prompt: &str, _width: u32, _height: u32) -> PinResult<Vec<u8>> {
        std::fs::read(&self.path)
            .map_err(|e| PinError::upstream(format!("could not read {}: {e}", self.path.display())))
    }
}
