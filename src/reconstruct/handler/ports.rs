use std::collections::BTreeMap;

use crate::container::{ContainerConfig, HostConfig, PortBinding, PortKey};
use crate::reconstruct::baseline::Baseline;
use crate::reconstruct::option::contains;

/// `-P`, or one `-p` per live binding plus `--expose` for ports that are only
/// declared by the container and not already by its image.
pub fn ports(host: &HostConfig, config: &ContainerConfig, baseline: &Baseline) -> Vec<String> {
    if host.publish_all_ports {
        return vec!["-P".to_string()];
    }

    let mut bound = BTreeMap::<PortKey, &[PortBinding]>::new();
    for (raw, bindings) in host.port_bindings.iter().flatten() {
        let (Some(key), Some(bindings)) = (PortKey::parse(raw), bindings.as_deref()) else {
            continue;
        };
        if !bindings.is_empty() {
            bound.insert(key, bindings);
        }
    }

    let mut tokens = Vec::new();
    for (key, bindings) in &bound {
        for binding in bindings.iter() {
            tokens.push(format!("-p {}", publish_spec(key, binding, baseline)));
        }
    }

    let mut exposed = config
        .exposed_ports
        .iter()
        .flatten()
        .filter(|(raw, _)| !baseline.image_exposes(raw))
        .filter_map(|(raw, _)| PortKey::parse(raw))
        .filter(|key| !bound.contains_key(key))
        .collect::<Vec<_>>();
    exposed.sort();
    for key in exposed {
        tokens.push(format!("--expose={}", key));
    }
    tokens
}

fn publish_spec(key: &PortKey, binding: &PortBinding, baseline: &Baseline) -> String {
    let host_ip = if contains(baseline.engine.wildcard_host_ips, &binding.host_ip.as_str()) {
        String::new()
    } else if binding.host_ip.contains(':') {
        format!("[{}]", binding.host_ip)
    } else {
        binding.host_ip.clone()
    };
    let host_port = match binding.host_port.as_str() {
        "0" => "",
        port => port,
    };
    match (host_ip.is_empty(), host_port.is_empty()) {
        (true, true) => key.to_string(),
        (true, false) => format!("{}:{}", host_port, key),
        (false, true) => format!("{}::{}", host_ip, key),
        (false, false) => format!("{}:{}:{}", host_ip, host_port, key),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::container::image::{ImageConfig, ImageInspect};
    use crate::container::ContainerInspect;

    fn binding(host_ip: &str, host_port: &str) -> PortBinding {
        PortBinding {
            host_ip: host_ip.to_string(),
            host_port: host_port.to_string(),
        }
    }

    fn render(container: &ContainerInspect, image: &ImageInspect) -> Vec<String> {
        let baseline = Baseline::new(container, image);
        ports(&container.host_config, &container.config, &baseline)
    }

    #[test]
    fn publish_all_ignores_bindings() {
        let mut container = ContainerInspect::default();
        container.host_config.publish_all_ports = true;
        container.host_config.port_bindings = Some(BTreeMap::from([(
            "80/tcp".to_string(),
            Some(vec![binding("", "8080")]),
        )]));
        assert_eq!(render(&container, &ImageInspect::default()), vec!["-P"]);
    }

    #[test]
    fn bindings_render_host_parts() {
        let mut container = ContainerInspect::default();
        container.host_config.port_bindings = Some(BTreeMap::from([
            ("80/tcp".to_string(), Some(vec![binding("0.0.0.0", "8080"), binding("::", "8080")])),
            ("53/udp".to_string(), Some(vec![binding("127.0.0.1", "5353")])),
            ("9000/tcp".to_string(), Some(vec![binding("", "")])),
            ("9100/tcp".to_string(), Some(vec![binding("10.0.0.1", "0")])),
            ("9200/tcp".to_string(), Some(vec![binding("::1", "9200")])),
            ("9300/tcp".to_string(), None),
        ]));
        assert_eq!(
            render(&container, &ImageInspect::default()),
            vec![
                "-p 127.0.0.1:5353:53/udp",
                "-p 8080:80",
                "-p 8080:80",
                "-p 9000",
                "-p 10.0.0.1::9100",
                "-p [::1]:9200:9200",
            ]
        );
    }

    #[test]
    fn expose_only_unbound_and_undeclared() {
        let mut container = ContainerInspect::default();
        container.config.exposed_ports = Some(BTreeMap::from([
            ("80/tcp".to_string(), Value::Null),
            ("443/tcp".to_string(), Value::Null),
            ("7946/udp".to_string(), Value::Null),
        ]));
        container.host_config.port_bindings = Some(BTreeMap::from([(
            "443/tcp".to_string(),
            Some(vec![binding("", "8443")]),
        )]));
        let image = ImageInspect {
            config: Some(ImageConfig {
                exposed_ports: Some(BTreeMap::from([("80/tcp".to_string(), Value::Null)])),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(render(&container, &image), vec!["-p 8443:443", "--expose=7946/udp"]);
    }
}
