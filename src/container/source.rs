use std::io::Read;
use std::path::Path;
use std::process::Command;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::container::image::ImageInspect;
use crate::container::ContainerInspect;
use crate::error::{Result, RunlikeError};

/// 获取容器和 Image 的 inspect 结果
pub trait InspectSource {
    fn container(&self, target: &str) -> Result<ContainerInspect>;

    fn image(&self, reference: &str) -> Result<ImageInspect>;
}

/// 通过本地 docker 命令行获取 inspect 结果
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> DockerCli {
        DockerCli { binary: binary.into() }
    }

    fn inspect<T: DeserializeOwned>(&self, kind: &str, target: &str) -> Result<T> {
        let what = format!("{} '{}'", kind, target);
        debug!("Running {} {} inspect {}", self.binary, kind, target);
        let output = Command::new(&self.binary)
            .args([kind, "inspect", target])
            .output()
            .map_err(|err| RunlikeError::fetch(&what, format!("can not run '{}': {}", self.binary, err)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RunlikeError::fetch(&what, stderr.trim()));
        }
        decode_single(&what, &output.stdout)
    }
}

impl InspectSource for DockerCli {
    fn container(&self, target: &str) -> Result<ContainerInspect> {
        self.inspect("container", target)
    }

    fn image(&self, reference: &str) -> Result<ImageInspect> {
        self.inspect("image", reference)
    }
}

/// 使用已有的 inspect 文档，未提供 Image 文档时交给 fallback 查询
pub struct Snapshot<S> {
    container: ContainerInspect,
    image: Option<ImageInspect>,
    fallback: S,
}

impl<S: InspectSource> Snapshot<S> {
    pub fn new(container: ContainerInspect, image: Option<ImageInspect>, fallback: S) -> Snapshot<S> {
        Snapshot {
            container,
            image,
            fallback,
        }
    }

    pub fn from_reader<R: Read>(reader: R, image_file: Option<&Path>, fallback: S) -> Result<Snapshot<S>> {
        let container = read_single("container snapshot", reader)?;
        let image = image_file.map(read_image_file).transpose()?;
        Ok(Snapshot::new(container, image, fallback))
    }
}

impl<S: InspectSource> InspectSource for Snapshot<S> {
    fn container(&self, _target: &str) -> Result<ContainerInspect> {
        Ok(self.container.clone())
    }

    fn image(&self, reference: &str) -> Result<ImageInspect> {
        match &self.image {
            Some(image) => Ok(image.clone()),
            None => self.fallback.image(reference),
        }
    }
}

pub fn read_image_file(path: &Path) -> Result<ImageInspect> {
    let what = format!("image file '{}'", path.display());
    let file = std::fs::File::open(path).map_err(|err| RunlikeError::fetch(&what, err.to_string()))?;
    read_single(&what, file)
}

fn read_single<T: DeserializeOwned, R: Read>(what: &str, reader: R) -> Result<T> {
    let value = serde_json::from_reader::<_, Value>(reader).map_err(|err| RunlikeError::decode(what, err))?;
    from_value(what, value)
}

fn decode_single<T: DeserializeOwned>(what: &str, body: &[u8]) -> Result<T> {
    let value = serde_json::from_slice::<Value>(body).map_err(|err| RunlikeError::decode(what, err))?;
    from_value(what, value)
}

/// `docker inspect` 输出的是数组，这里只接受恰好一个元素，也兼容单个对象
fn from_value<T: DeserializeOwned>(what: &str, value: Value) -> Result<T> {
    let value = match value {
        Value::Array(mut items) => match items.len() {
            1 => items.remove(0),
            0 => return Err(RunlikeError::usage(format!("{} is empty", what))),
            n => {
                return Err(RunlikeError::usage(format!(
                    "only 1 container can be inspected at a time, {} holds {}",
                    what, n
                )))
            }
        },
        value => value,
    };
    serde_json::from_value(value).map_err(|err| RunlikeError::decode(what, err))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    struct NoDocker;

    impl InspectSource for NoDocker {
        fn container(&self, target: &str) -> Result<ContainerInspect> {
            Err(RunlikeError::fetch(target, "no docker"))
        }

        fn image(&self, reference: &str) -> Result<ImageInspect> {
            Err(RunlikeError::fetch(reference, "no docker"))
        }
    }

    #[test]
    fn snapshot_accepts_array_or_object() -> anyhow::Result<()> {
        let array = r#"[{"Name": "/db", "Config": {"Image": "postgres"}}]"#;
        let snapshot = Snapshot::from_reader(array.as_bytes(), None, NoDocker)?;
        assert_eq!(snapshot.container("")?.short_name(), "db");

        let object = r#"{"Name": "/db"}"#;
        let snapshot = Snapshot::from_reader(object.as_bytes(), None, NoDocker)?;
        assert_eq!(snapshot.container("")?.short_name(), "db");
        Ok(())
    }

    #[test]
    fn snapshot_rejects_many_or_none() {
        let many = r#"[{"Name": "/a"}, {"Name": "/b"}]"#;
        let err = Snapshot::from_reader(many.as_bytes(), None, NoDocker).err();
        assert!(matches!(err, Some(RunlikeError::Usage(_))));

        let err = Snapshot::from_reader("[]".as_bytes(), None, NoDocker).err();
        assert!(matches!(err, Some(RunlikeError::Usage(_))));
    }

    #[test]
    fn snapshot_rejects_malformed() {
        let err = Snapshot::from_reader("{not json".as_bytes(), None, NoDocker).err();
        assert!(matches!(err, Some(RunlikeError::Decode { .. })));

        let err = Snapshot::from_reader(r#"{"Name": 3}"#.as_bytes(), None, NoDocker).err();
        assert!(matches!(err, Some(RunlikeError::Decode { .. })));
    }

    #[test]
    fn snapshot_image_falls_back() -> anyhow::Result<()> {
        let snapshot = Snapshot::from_reader(r#"{"Name": "/a"}"#.as_bytes(), None, NoDocker)?;
        assert!(matches!(snapshot.image("alpine"), Err(RunlikeError::Fetch { .. })));

        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"[{{"Id": "sha256:1", "Config": {{"WorkingDir": "/srv"}}}}]"#)?;
        let snapshot = Snapshot::from_reader(r#"{"Name": "/a"}"#.as_bytes(), Some(file.path()), NoDocker)?;
        assert_eq!(snapshot.image("alpine")?.config().working_dir, "/srv");
        Ok(())
    }

    #[test]
    fn docker_cli_missing_binary_is_fetch_error() {
        let cli = DockerCli::new("/nonexistent/docker-binary");
        assert!(matches!(cli.container("web"), Err(RunlikeError::Fetch { .. })));
    }
}
