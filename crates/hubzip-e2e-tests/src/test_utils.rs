use eyre::Result;
use std::io::Write;
use std::sync::Once;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::FileOptions;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    });
}

/// Builds an in-memory zip archive from `(entry name, contents)` pairs.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer.start_file(*name, FileOptions::default())?;
        writer.write_all(contents)?;
    }
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// A two-entry archive shaped like GitHub's default-branch download for
/// `{repository}-master`.
pub fn sample_archive(repository: &str) -> Vec<u8> {
    build_zip(&[
        (
            format!("{repository}-master/README.md").as_str(),
            b"hello".as_slice(),
        ),
        (
            format!("{repository}-master/src/main.rs").as_str(),
            b"fn main() {}".as_slice(),
        ),
    ])
    .expect("building the sample archive should not fail")
}

/// Mounts a successful archive response for `owner/repository` on the mock
/// server, with the correct content type.
pub async fn mount_archive(server: &MockServer, owner: &str, repository: &str, body: Vec<u8>) {
    mount_archive_response(
        server,
        owner,
        repository,
        ResponseTemplate::new(200).set_body_raw(body, "application/zip"),
    )
    .await;
}

/// Mounts an arbitrary response on the archive endpoint for
/// `owner/repository`.
pub async fn mount_archive_response(
    server: &MockServer,
    owner: &str,
    repository: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{owner}/{repository}/archive/master.zip")))
        .respond_with(response)
        .mount(server)
        .await;
}
