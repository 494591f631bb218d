//! Reconstruction rules for settings that are not a plain value or set comparison.

use std::collections::BTreeMap;

use crate::container::{ContainerConfig, DeviceMapping, DeviceRequest, Mount, RestartPolicy, ThrottleDevice, Ulimit, WeightDevice};
use crate::reconstruct::baseline::EngineDefaults;
use crate::reconstruct::option::contains;
use crate::util::quote::{double_quote, quote_arg, single_quote};

mod command;
mod health;
mod ports;

pub use command::{command, entrypoint};
pub use health::healthcheck;
pub use ports::ports;

fn capability_name(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.strip_prefix("CAP_") {
        Some(name) => name.to_string(),
        None => upper,
    }
}

fn capability_token(flag: &str, name: &str) -> String {
    if name == "ALL" {
        format!("{}ALL", flag)
    } else {
        format!("{}CAP_{}", flag, name)
    }
}

/// `--cap-add` only for capabilities docker does not grant already, `--cap-drop`
/// only for capabilities docker would otherwise grant.
pub fn capabilities(added: &[String], dropped: &[String], engine: &EngineDefaults) -> Vec<String> {
    let is_default = |name: &str| contains(engine.capabilities, &name);
    let mut tokens = Vec::new();
    for name in added.iter().map(|raw| capability_name(raw)) {
        if name == "ALL" || !is_default(name.as_str()) {
            tokens.push(capability_token("--cap-add=", &name));
        }
    }
    for name in dropped.iter().map(|raw| capability_name(raw)) {
        if name == "ALL" || is_default(name.as_str()) {
            tokens.push(capability_token("--cap-drop=", &name));
        }
    }
    tokens
}

pub fn restart_policy(policy: &RestartPolicy, engine: &EngineDefaults) -> Vec<String> {
    if contains(engine.restart_policies, &policy.name.as_str()) {
        return Vec::new();
    }
    let mut restart = policy.name.clone();
    if policy.name == "on-failure" && policy.maximum_retry_count > 0 {
        restart = format!("{}:{}", restart, policy.maximum_retry_count);
    }
    vec![format!("--restart={}", restart)]
}

/// Renders `flag + value` unless `value` is one of the engine defaults.
pub fn mode(value: &str, defaults: &[&str], flag: &str) -> Vec<String> {
    if contains(defaults, &value) {
        Vec::new()
    } else {
        vec![format!("{}{}", flag, quote_arg(value))]
    }
}

pub fn isolation(value: &str, engine: &EngineDefaults) -> Vec<String> {
    mode(value, engine.isolation, "--isolation=")
}

pub fn network_mode(value: &str, engine: &EngineDefaults) -> Vec<String> {
    mode(value, engine.network_modes, "--network=")
}

// NOTE: links are deprecated, https://docs.docker.com/engine/network/links/
/// docker stores links as `/source:/container/alias`.
pub fn links(links: &[String]) -> Vec<String> {
    links
        .iter()
        .map(|link| {
            let (source, alias) = link.split_once(':').unwrap_or((link.as_str(), link.as_str()));
            let source = source.trim_start_matches('/');
            let alias = alias.rsplit('/').next().unwrap_or(alias);
            if source == alias || alias.is_empty() {
                format!("--link {}", quote_arg(source))
            } else {
                format!("--link {}", quote_arg(&format!("{}:{}", source, alias)))
            }
        })
        .collect()
}

pub fn devices(devices: &[DeviceMapping], engine: &EngineDefaults) -> Vec<String> {
    devices
        .iter()
        .map(|device| {
            let mut spec = format!("{}:{}", device.path_on_host, device.path_in_container);
            if !device.cgroup_permissions.is_empty() && device.cgroup_permissions != engine.device_permissions {
                spec = format!("{}:{}", spec, device.cgroup_permissions);
            }
            format!("--device {}", quote_arg(&spec))
        })
        .collect()
}

/// Labels whose value differs from the image, or that the image does not declare.
pub fn labels(labels: Option<&BTreeMap<String, String>>, image: Option<&BTreeMap<String, String>>) -> Vec<String> {
    let Some(labels) = labels else {
        return Vec::new();
    };
    labels
        .iter()
        .filter(|(key, value)| image.and_then(|image| image.get(*key)) != Some(*value))
        .map(|(key, value)| format!("--label={}", single_quote(&format!("{}={}", key, value))))
        .collect()
}

pub fn tmpfs(mounts: Option<&BTreeMap<String, String>>) -> Vec<String> {
    mounts
        .into_iter()
        .flatten()
        .map(|(path, options)| {
            if options.is_empty() {
                format!("--tmpfs={}", quote_arg(path))
            } else {
                format!("--tmpfs={}", quote_arg(&format!("{}:{}", path, options)))
            }
        })
        .collect()
}

/// `-d` when nothing is attached, `--attach` when the attached streams differ
/// from what `docker run` attaches on its own.
pub fn attach(config: &ContainerConfig) -> Vec<String> {
    let streams = [
        ("stdin", config.attach_stdin),
        ("stdout", config.attach_stdout),
        ("stderr", config.attach_stderr),
    ];
    if streams.iter().all(|(_, attached)| !attached) {
        return vec!["-d".to_string()];
    }
    if config.attach_stdout && config.attach_stderr && config.attach_stdin == config.open_stdin {
        return Vec::new();
    }
    streams
        .iter()
        .filter(|(_, attached)| *attached)
        .map(|(name, _)| format!("--attach={}", name))
        .collect()
}

pub fn mounts(mounts: &[Mount]) -> Vec<String> {
    mounts
        .iter()
        .map(|mount| {
            let mut spec = vec![format!("type={}", mount.type_field)];
            if !mount.source.is_empty() {
                spec.push(format!("source={}", mount.source));
            }
            spec.push(format!("target={}", mount.target));
            if mount.read_only {
                spec.push("readonly".to_string());
            }
            format!("--mount {}", quote_arg(&spec.join(",")))
        })
        .collect()
}

pub fn ulimits(ulimits: &[Ulimit]) -> Vec<String> {
    ulimits
        .iter()
        .map(|ulimit| {
            if ulimit.soft == ulimit.hard {
                format!("--ulimit {}={}", ulimit.name, ulimit.soft)
            } else {
                format!("--ulimit {}={}:{}", ulimit.name, ulimit.soft, ulimit.hard)
            }
        })
        .collect()
}

pub fn weight_devices(devices: &[WeightDevice]) -> Vec<String> {
    devices
        .iter()
        .map(|device| format!("--blkio-weight-device {}", quote_arg(&format!("{}:{}", device.path, device.weight))))
        .collect()
}

pub fn throttle_devices(devices: &[ThrottleDevice], flag: &str) -> Vec<String> {
    devices
        .iter()
        .map(|device| format!("{}{}", flag, quote_arg(&format!("{}:{}", device.path, device.rate))))
        .collect()
}

pub fn gpus(requests: &[DeviceRequest]) -> Vec<String> {
    requests
        .iter()
        .filter(|request| {
            request
                .capabilities
                .iter()
                .flatten()
                .any(|group| group.iter().any(|capability| capability == "gpu"))
        })
        .filter_map(|request| match request.device_ids.as_deref() {
            Some(ids) if !ids.is_empty() => {
                Some(format!("--gpus {}", double_quote(&format!("device={}", ids.join(",")))))
            }
            _ if request.count < 0 => Some("--gpus all".to_string()),
            _ if request.count > 0 => Some(format!("--gpus {}", request.count)),
            _ => None,
        })
        .collect()
}

/// `NanoCpus` back to the decimal `--cpus` value.
pub fn cpus(nano_cpus: i64) -> Vec<String> {
    if nano_cpus <= 0 {
        return Vec::new();
    }
    vec![format!("--cpus={}", nano_cpus as f64 / 1_000_000_000.0)]
}

/// Destination of a `-v source:destination[:options]` bind spec.
pub fn bind_destination(bind: &str) -> Option<&str> {
    let mut parts = bind.split(':');
    let first = parts.next()?;
    Some(parts.next().unwrap_or(first))
}
