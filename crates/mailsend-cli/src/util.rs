use mailsend_client::HttpSettings;
use mailsend_config::AppConfig;
use mailsend_core::FileHandle;
use std::path::PathBuf;
use std::time::Duration;

pub fn file_handles(paths: &[PathBuf], mime: Option<&str>) -> Vec<FileHandle> {
    paths
        .iter()
        .map(|path| match mime {
            Some(mime) => FileHandle::with_mime(path.clone(), mime),
            None => FileHandle::from_path(path.clone()),
        })
        .collect()
}

pub fn http_settings(config: &AppConfig) -> HttpSettings {
    HttpSettings {
        api_url: config.api_url.clone(),
        timeout: Duration::from_secs(config.http.timeout_secs),
        connect_timeout: Duration::from_secs(config.http.connect_timeout_secs),
        user_agent: config.http.user_agent.clone(),
    }
}
