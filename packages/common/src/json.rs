use crate::result::CommonResult;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Read and deserialize a JSON file
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> CommonResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a value as pretty JSON, creating parent directories as needed
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> CommonResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommonError;
    use std::collections::BTreeMap;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data.json");

        let mut value = BTreeMap::new();
        value.insert("order".to_string(), 3);

        write_json_file(&path, &value).unwrap();
        let read: BTreeMap<String, i32> = read_json_file(&path).unwrap();

        assert_eq!(read, value);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: CommonResult<Vec<u8>> = read_json_file(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(CommonError::Io(_))));
    }

    #[test]
    fn test_read_invalid_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: CommonResult<Vec<u8>> = read_json_file(&path);
        assert!(matches!(result, Err(CommonError::Json(_))));
    }
}
