//! Integration tests for Stamp

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const TEST_CONTENT_MD5: &str = "\"9473fdd0d880a43c21b7778d34872157\"";

    /// Command isolated from any user config
    fn stamp(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("stamp");
        cmd.arg("--config").arg(dir.path().join("config.toml"));
        cmd
    }

    fn body_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("body.txt");
        fs::write(&path, "test content").unwrap();
        path
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("stamp")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("HTTP conditional caching validation"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("stamp")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("stamp"));
    }

    #[test]
    fn etag_of_file() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        stamp(&dir)
            .arg("etag")
            .arg(&file)
            .assert()
            .success()
            .stdout(format!("{}\n", TEST_CONTENT_MD5));
    }

    #[test]
    fn etag_weak_sha256() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("hello.txt");
        fs::write(&file, "hello").unwrap();

        stamp(&dir)
            .args(["etag", "--weak", "--algorithm", "sha256"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("W/\"2cf24dba5fb0a30e"));
    }

    #[test]
    fn etag_unknown_algorithm_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        stamp(&dir)
            .args(["etag", "-a", "crc32"])
            .arg(&file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported digest algorithm: crc32"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn etag_missing_file_fails() {
        let dir = TempDir::new().unwrap();

        stamp(&dir)
            .args(["etag", "does-not-exist.bin"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("IO error"));
    }

    #[test]
    fn check_annotates_response() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        stamp(&dir)
            .arg("check")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("200 OK"))
            .stdout(predicate::str::contains(format!("ETag: {}", TEST_CONTENT_MD5)))
            .stdout(predicate::str::contains("[12 body bytes]"));
    }

    #[test]
    fn check_matching_etag_is_not_modified() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        stamp(&dir)
            .arg("check")
            .arg(&file)
            .args(["--if-none-match", TEST_CONTENT_MD5])
            .assert()
            .success()
            .stdout(predicate::str::contains("304 Not Modified"))
            .stdout(predicate::str::contains("Content-Length").not())
            .stdout(predicate::str::contains("[body suppressed]"));
    }

    #[test]
    fn check_repeated_if_none_match() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        stamp(&dir)
            .arg("check")
            .arg(&file)
            .args(["-i", "\"old-etag\"", "-i", TEST_CONTENT_MD5])
            .assert()
            .success()
            .stdout(predicate::str::contains("304 Not Modified"));
    }

    #[test]
    fn check_json_output() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        let output = stamp(&dir)
            .arg("check")
            .arg(&file)
            .args(["--json", "-i", "\"old-etag\", \"9473fdd0d880a43c21b7778d34872157\""])
            .output()
            .unwrap();

        assert!(output.status.success());
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed["status"], 304);
        assert_eq!(parsed["decision"], "not-modified");
        assert_eq!(parsed["body_bytes"], 0);
    }

    #[test]
    fn check_post_gets_no_etag() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);

        stamp(&dir)
            .arg("check")
            .arg(&file)
            .args(["--method", "POST"])
            .assert()
            .success()
            .stdout(predicate::str::contains("pass-through"))
            .stdout(predicate::str::contains("ETag").not());
    }

    #[test]
    fn directives_from_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            r#"
                [caching.directives]
                scope = "public"
                max_age = 31536000
                immutable = true
            "#,
        )
        .unwrap();

        stamp(&dir)
            .arg("directives")
            .assert()
            .success()
            .stdout("public, max-age=31536000, immutable\n");
    }

    #[test]
    fn directives_none_configured() {
        let dir = TempDir::new().unwrap();

        stamp(&dir)
            .arg("directives")
            .assert()
            .success()
            .stderr(predicate::str::contains("No default directives configured"));
    }

    #[test]
    fn empty_directives_table_sets_no_cache_control() {
        let dir = TempDir::new().unwrap();
        let file = body_file(&dir);
        fs::write(
            dir.path().join("config.toml"),
            "[caching.directives]\nimmutable = false\n",
        )
        .unwrap();

        stamp(&dir)
            .arg("check")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("ETag"))
            .stdout(predicate::str::contains("Cache-Control").not());

        stamp(&dir)
            .arg("directives")
            .assert()
            .success()
            .stderr(predicate::str::contains("No default directives configured"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[caching\n").unwrap();

        stamp(&dir)
            .arg("directives")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();

        stamp(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();

        stamp(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[caching]"));
    }

    #[test]
    fn config_init_writes_file() {
        let dir = TempDir::new().unwrap();

        stamp(&dir).args(["config", "init"]).assert().success();

        let written = fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(written.contains("algorithm = \"md5\""));
    }

    #[test]
    fn config_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[caching]\nweak = true\n").unwrap();

        stamp(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stderr(predicate::str::contains("already exists"));

        assert!(fs::read_to_string(&path).unwrap().contains("weak = true"));
    }
}

mod http_tests {
    use async_trait::async_trait;
    use http::{Request, Response, StatusCode};
    use stamp::transport::{Handler, ETAG};
    use stamp::{CacheDirectives, CachingInterceptor, InterceptorConfig, StampError, StampResult};
    use std::io::{self, Cursor, Read, Seek, SeekFrom};

    /// Serves a static body through `http` crate types
    struct Static(&'static str);

    #[async_trait]
    impl Handler for Static {
        type Request = Request<()>;
        type Response = Response<Cursor<Vec<u8>>>;

        async fn handle(&self, _request: &Request<()>) -> StampResult<Self::Response> {
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("content-length", self.0.len())
                .body(Cursor::new(self.0.as_bytes().to_vec()))
                .unwrap())
        }
    }

    /// Body that fails halfway through the first read
    #[derive(Debug)]
    struct Truncated;

    impl Read for Truncated {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "body truncated"))
        }
    }

    impl Seek for Truncated {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    struct TruncatedHandler;

    #[async_trait]
    impl Handler for TruncatedHandler {
        type Request = Request<()>;
        type Response = Response<Truncated>;

        async fn handle(&self, _request: &Request<()>) -> StampResult<Self::Response> {
            Ok(Response::new(Truncated))
        }
    }

    fn interceptor() -> CachingInterceptor {
        let mut directives = CacheDirectives::new();
        directives.mark_private().mark_no_cache();
        CachingInterceptor::new(InterceptorConfig {
            default_directives: Some(directives),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn first_request_then_revalidation() {
        let interceptor = interceptor();
        let handler = Static("test content");

        let first = interceptor
            .handle(&Request::get("/").body(()).unwrap(), &handler)
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers()["cache-control"], "private, no-cache");
        let etag = first.headers()[ETAG].to_str().unwrap().to_string();
        assert_eq!(etag, "\"9473fdd0d880a43c21b7778d34872157\"");

        let mut body = String::new();
        first.into_body().read_to_string(&mut body).unwrap();
        assert_eq!(body, "test content");

        let second = interceptor
            .handle(
                &Request::get("/")
                    .header("if-none-match", &etag)
                    .body(())
                    .unwrap(),
                &handler,
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
        assert!(!second.headers().contains_key("content-length"));
        assert_eq!(second.headers()[ETAG], etag.as_str());
    }

    #[tokio::test]
    async fn repeated_if_none_match_lines_revalidate() {
        let response = interceptor()
            .handle(
                &Request::get("/")
                    .header("if-none-match", "\"old-etag\"")
                    .header("if-none-match", "\"9473fdd0d880a43c21b7778d34872157\"")
                    .body(())
                    .unwrap(),
                &Static("test content"),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert!(!response.headers().contains_key("content-length"));
    }

    #[tokio::test]
    async fn unreadable_body_fails_request() {
        let err = interceptor()
            .handle(&Request::get("/").body(()).unwrap(), &TruncatedHandler)
            .await
            .unwrap_err();

        assert!(matches!(err, StampError::StreamRead { .. }));
        assert!(err.to_string().contains("body truncated"));
    }

    #[tokio::test]
    async fn head_requests_are_cacheable() {
        let response = interceptor()
            .handle(
                &Request::head("/").body(()).unwrap(),
                &Static("payload"),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key(ETAG));
    }

    #[tokio::test]
    async fn delete_requests_pass_through() {
        let response = interceptor()
            .handle(
                &Request::delete("/").body(()).unwrap(),
                &Static("payload"),
            )
            .await
            .unwrap();
        assert!(!response.headers().contains_key(ETAG));
        assert!(!response.headers().contains_key("cache-control"));
    }
}
