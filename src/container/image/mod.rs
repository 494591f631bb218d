use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::container::HealthConfig;

/// `docker image inspect` 的结果
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageInspect {
    pub id: String,
    pub config: Option<ImageConfig>,
}

impl ImageInspect {
    /// Image 没有 Config 时视为没有声明任何默认值
    pub fn config(&self) -> &ImageConfig {
        static EMPTY: ImageConfig = ImageConfig::EMPTY;
        self.config.as_ref().unwrap_or(&EMPTY)
    }
}

/// Image 声明的默认值，容器的配置会与之对比
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageConfig {
    pub user: String,
    pub exposed_ports: Option<BTreeMap<String, Value>>,
    pub env: Option<Vec<String>>,
    pub entrypoint: Option<Vec<String>>,
    pub cmd: Option<Vec<String>>,
    pub volumes: Option<BTreeMap<String, Value>>,
    pub working_dir: String,
    pub labels: Option<BTreeMap<String, String>>,
    pub healthcheck: Option<HealthConfig>,
    pub stop_signal: Option<String>,
}

impl ImageConfig {
    const EMPTY: ImageConfig = ImageConfig {
        user: String::new(),
        exposed_ports: None,
        env: None,
        entrypoint: None,
        cmd: None,
        volumes: None,
        working_dir: String::new(),
        labels: None,
        healthcheck: None,
        stop_signal: None,
    };
}
