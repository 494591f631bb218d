//! The ordered list of reconstructable settings.
//!
//! Entries are grouped the way `docker run` flags are conventionally written:
//! identity, runtime behaviour, volumes, popular options, networking,
//! resources and finally the rarely used ones. The order is part of the
//! output format.

use std::collections::BTreeMap;

use crate::config::RenderOptions;
use crate::container::{slice, ContainerInspect};
use crate::reconstruct::baseline::Baseline;
use crate::reconstruct::handler;
use crate::reconstruct::option::OptionSpec;

const NONE: [&str; 0] = [];

fn strs(values: &Option<Vec<String>>) -> impl Iterator<Item = &str> {
    slice(values).iter().map(String::as_str)
}

fn pairs(entries: &Option<BTreeMap<String, String>>) -> impl Iterator<Item = (&str, &str)> {
    entries.iter().flatten().map(|(key, value)| (key.as_str(), value.as_str()))
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `Config.Volumes` entries that are not backed by a bind or a mount.
fn anonymous_volumes(container: &ContainerInspect) -> Vec<&str> {
    let host = &container.host_config;
    let destinations = slice(&host.binds)
        .iter()
        .filter_map(|bind| handler::bind_destination(bind))
        .chain(slice(&host.mounts).iter().map(|mount| mount.target.as_str()))
        .collect::<Vec<_>>();
    container
        .config
        .volumes
        .iter()
        .flat_map(|volumes| volumes.keys())
        .map(String::as_str)
        .filter(|path| !destinations.contains(path))
        .collect()
}

pub fn build<'a>(container: &'a ContainerInspect, baseline: Baseline<'a>, options: &RenderOptions) -> Vec<OptionSpec<'a>> {
    let config = &container.config;
    let host = &container.host_config;
    let engine = baseline.engine;

    let mut catalog = vec![
        // identity
        OptionSpec::optional(non_empty(&config.hostname), baseline.hostname, "--hostname="),
        OptionSpec::scalar(&config.domainname, "", "--domainname="),
        OptionSpec::optional(config.mac_address.as_deref(), "", "--mac-address="),
        // runtime behaviour
        OptionSpec::scalar(config.open_stdin, false, "-i"),
        OptionSpec::scalar(config.tty, false, "-t"),
        OptionSpec::scalar(host.auto_remove, false, "--rm"),
        OptionSpec::scalar(host.privileged, false, "--privileged"),
        OptionSpec::scalar(&config.user, baseline.image.user.as_str(), "--user="),
        OptionSpec::optional(host.init, false, "--init"),
        OptionSpec::custom(move || handler::restart_policy(&host.restart_policy, engine)),
        // environment
        OptionSpec::collection(strs(&config.env), baseline.image_env(), "--env="),
        // volumes
        OptionSpec::collection(strs(&host.binds), NONE, "--volume="),
        OptionSpec::collection(anonymous_volumes(container), baseline.image_volumes(), "--volume="),
        OptionSpec::collection(strs(&host.volumes_from), NONE, "--volumes-from="),
        OptionSpec::scalar(&host.volume_driver, "", "--volume-driver="),
        OptionSpec::custom(move || handler::mounts(slice(&host.mounts))),
        // popular options
        OptionSpec::scalar(&config.working_dir, baseline.image.working_dir.as_str(), "--workdir="),
        OptionSpec::optional(non_empty(&host.log_config.type_field), engine.log_driver, "--log-driver="),
        OptionSpec::mapping(pairs(&host.log_config.config), "--log-opt "),
    ];
    if options.include_labels {
        catalog.push(OptionSpec::custom(move || {
            handler::labels(config.labels.as_ref(), baseline.image.labels.as_ref())
        }));
    }
    catalog.extend([
        OptionSpec::custom(move || handler::capabilities(slice(&host.cap_add), slice(&host.cap_drop), engine)),
        OptionSpec::scalar(host.readonly_rootfs, false, "--read-only"),
        // lesser used
        OptionSpec::custom(move || handler::devices(slice(&host.devices), engine)),
        OptionSpec::custom(move || handler::links(slice(&host.links))),
        OptionSpec::optional(non_empty(&host.runtime), engine.runtime, "--runtime="),
        OptionSpec::scalar(&host.pid_mode, "", "--pid="),
        OptionSpec::optional(host.pids_limit.filter(|limit| *limit > 0), 0i64, "--pids-limit="),
        OptionSpec::scalar(&host.container_id_file, "", "--cidfile="),
        // networking
        OptionSpec::custom(move || handler::ports(host, config, &baseline)),
        OptionSpec::custom(move || handler::network_mode(&host.network_mode, engine)),
        OptionSpec::collection(strs(&host.extra_hosts), NONE, "--add-host="),
        OptionSpec::collection(strs(&host.dns), NONE, "--dns="),
        OptionSpec::collection(strs(&host.dns_options), NONE, "--dns-option="),
        OptionSpec::collection(strs(&host.dns_search), NONE, "--dns-search="),
        // health check
        OptionSpec::custom(move || handler::healthcheck(config.healthcheck.as_ref(), baseline.image_healthcheck())),
        // attach
        OptionSpec::custom(move || handler::attach(config)),
        // cpu
        OptionSpec::scalar(host.cpu_shares, 0i64, "--cpu-shares="),
        OptionSpec::custom(move || handler::cpus(host.nano_cpus)),
        OptionSpec::scalar(host.cpu_period, 0i64, "--cpu-period="),
        OptionSpec::scalar(host.cpu_quota, 0i64, "--cpu-quota="),
        OptionSpec::scalar(host.cpu_realtime_period, 0i64, "--cpu-rt-period="),
        OptionSpec::scalar(host.cpu_realtime_runtime, 0i64, "--cpu-rt-runtime="),
        OptionSpec::scalar(&host.cpuset_cpus, "", "--cpuset-cpus="),
        OptionSpec::scalar(&host.cpuset_mems, "", "--cpuset-mems="),
        // memory
        OptionSpec::scalar(host.memory, 0i64, "--memory="),
        OptionSpec::scalar(host.memory_reservation, 0i64, "--memory-reservation="),
        OptionSpec::optional((host.memory_swap != 0).then_some(host.memory_swap), baseline.memory_swap, "--memory-swap="),
        OptionSpec::optional(host.memory_swappiness, -1i64, "--memory-swappiness="),
        OptionSpec::scalar(host.kernel_memory, 0i64, "--kernel-memory="),
        OptionSpec::optional((host.shm_size > 0).then_some(host.shm_size), engine.shm_size, "--shm-size="),
        // oom
        OptionSpec::optional(host.oom_kill_disable, false, "--oom-kill-disable"),
        OptionSpec::scalar(host.oom_score_adj, 0i64, "--oom-score-adj="),
        // device cgroup and namespaces
        OptionSpec::collection(strs(&host.device_cgroup_rules), NONE, "--device-cgroup-rule="),
        OptionSpec::custom(move || handler::gpus(slice(&host.device_requests))),
        OptionSpec::custom(move || handler::mode(&host.ipc_mode, engine.ipc_modes, "--ipc=")),
        OptionSpec::scalar(&host.uts_mode, "", "--uts="),
        OptionSpec::scalar(&host.userns_mode, "", "--userns="),
        OptionSpec::custom(move || handler::mode(&host.cgroupns_mode, engine.cgroupns_modes, "--cgroupns=")),
        OptionSpec::scalar(&host.cgroup_parent, "", "--cgroup-parent="),
        OptionSpec::collection(strs(&host.group_add), NONE, "--group-add="),
        OptionSpec::custom(move || handler::ulimits(slice(&host.ulimits))),
        OptionSpec::custom(move || handler::tmpfs(host.tmpfs.as_ref())),
        // blkio
        OptionSpec::scalar(host.blkio_weight, 0i64, "--blkio-weight="),
        OptionSpec::custom(move || handler::weight_devices(slice(&host.blkio_weight_device))),
        OptionSpec::custom(move || handler::throttle_devices(slice(&host.blkio_device_read_bps), "--device-read-bps ")),
        OptionSpec::custom(move || handler::throttle_devices(slice(&host.blkio_device_write_bps), "--device-write-bps ")),
        OptionSpec::custom(move || handler::throttle_devices(slice(&host.blkio_device_read_iops), "--device-read-iops ")),
        OptionSpec::custom(move || {
            handler::throttle_devices(slice(&host.blkio_device_write_iops), "--device-write-iops ")
        }),
        // stop
        OptionSpec::optional(config.stop_signal.as_deref(), baseline.image_stop_signal(), "--stop-signal="),
        OptionSpec::optional(config.stop_timeout, engine.stop_timeout, "--stop-timeout="),
        // security, storage and kernel parameters
        OptionSpec::collection(strs(&host.security_opt), NONE, "--security-opt="),
        OptionSpec::mapping(pairs(&host.storage_opt), "--storage-opt "),
        OptionSpec::mapping(pairs(&host.sysctls), "--sysctl "),
        OptionSpec::custom(move || handler::isolation(&host.isolation, engine)),
        OptionSpec::mapping(pairs(&host.annotations), "--annotation "),
        OptionSpec::custom(move || handler::entrypoint(slice(&config.entrypoint), baseline.image_entrypoint())),
    ]);
    catalog
}
