//! Reference values that every setting is diffed against.
//!
//! Engine defaults are the values the docker daemon fills in when a flag is
//! not passed. They depend on the engine version, so they all live in
//! [`EngineDefaults`]. Image-declared defaults come from the image the
//! container was created from.

use crate::container::image::{ImageConfig, ImageInspect};
use crate::container::{slice, ContainerInspect, HealthConfig};

/// Constants docker uses when the corresponding `docker run` flag is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineDefaults {
    pub restart_policies: &'static [&'static str],
    pub runtime: &'static str,
    pub log_driver: &'static str,
    pub network_modes: &'static [&'static str],
    pub isolation: &'static [&'static str],
    pub ipc_modes: &'static [&'static str],
    pub cgroupns_modes: &'static [&'static str],
    pub device_permissions: &'static str,
    pub shm_size: i64,
    pub stop_timeout: i64,
    pub capabilities: &'static [&'static str],
    pub wildcard_host_ips: &'static [&'static str],
}

pub const ENGINE_DEFAULTS: EngineDefaults = EngineDefaults {
    restart_policies: &["", "no"],
    runtime: "runc",
    log_driver: "json-file",
    network_modes: &["", "default", "bridge"],
    isolation: &["", "default"],
    ipc_modes: &["", "private", "shareable"],
    cgroupns_modes: &["", "private"],
    device_permissions: "rwm",
    shm_size: 64 * 1024 * 1024,
    stop_timeout: 10,
    // https://github.com/moby/moby/blob/master/oci/caps/defaults.go
    capabilities: &[
        "CHOWN",
        "DAC_OVERRIDE",
        "FSETID",
        "FOWNER",
        "MKNOD",
        "NET_RAW",
        "SETGID",
        "SETUID",
        "SETFCAP",
        "SETPCAP",
        "NET_BIND_SERVICE",
        "SYS_CHROOT",
        "KILL",
        "AUDIT_WRITE",
    ],
    wildcard_host_ips: &["", "0.0.0.0", "::"],
};

/// Everything a catalog entry may compare against, built once per reconstruction.
#[derive(Debug, Clone, Copy)]
pub struct Baseline<'a> {
    pub engine: &'static EngineDefaults,
    pub image: &'a ImageConfig,
    /// docker names the container host after the short container id
    pub hostname: &'a str,
    /// docker doubles `--memory` into the swap limit when no swap is given
    pub memory_swap: i64,
}

impl<'a> Baseline<'a> {
    pub fn new(container: &'a ContainerInspect, image: &'a ImageInspect) -> Baseline<'a> {
        let memory = container.host_config.memory;
        Baseline {
            engine: &ENGINE_DEFAULTS,
            image: image.config(),
            hostname: container.short_id(),
            memory_swap: if memory > 0 { memory.saturating_mul(2) } else { 0 },
        }
    }

    pub fn image_env(&self) -> impl Iterator<Item = &'a str> {
        let image: &'a ImageConfig = self.image;
        slice(&image.env).iter().map(String::as_str)
    }

    pub fn image_volumes(&self) -> impl Iterator<Item = &'a str> {
        let image: &'a ImageConfig = self.image;
        image.volumes.iter().flat_map(|volumes| volumes.keys()).map(String::as_str)
    }

    pub fn image_exposes(&self, port: &str) -> bool {
        self.image.exposed_ports.as_ref().is_some_and(|ports| ports.contains_key(port))
    }

    pub fn image_cmd(&self) -> &'a [String] {
        slice(&self.image.cmd)
    }

    pub fn image_entrypoint(&self) -> &'a [String] {
        slice(&self.image.entrypoint)
    }

    pub fn image_healthcheck(&self) -> Option<&'a HealthConfig> {
        self.image.healthcheck.as_ref()
    }

    pub fn image_stop_signal(&self) -> &'a str {
        self.image.stop_signal.as_deref().unwrap_or_default()
    }
}
