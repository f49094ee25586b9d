use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use wafer::{resolve_target, NotFound, Server, ServerConfig};

#[cfg(test)]
mod path_resolution_tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/www")
    }

    #[test]
    fn test_normal_content_paths() {
        assert_eq!(
            resolve_target(&root(), "/index.html"),
            Ok(PathBuf::from("/srv/www/index.html"))
        );
        assert_eq!(
            resolve_target(&root(), "/css/style.css"),
            Ok(PathBuf::from("/srv/www/css/style.css"))
        );
    }

    #[test]
    fn test_trailing_slash_maps_to_index() {
        assert_eq!(
            resolve_target(&root(), "/"),
            Ok(PathBuf::from("/srv/www/index.html"))
        );
        assert_eq!(
            resolve_target(&root(), "/docs/"),
            Ok(PathBuf::from("/srv/www/docs/index.html"))
        );
    }

    #[test]
    fn test_basic_traversal_is_rejected() {
        assert_eq!(resolve_target(&root(), "/../etc/passwd"), Err(NotFound));
        assert_eq!(resolve_target(&root(), "/../../etc/passwd"), Err(NotFound));
        assert_eq!(resolve_target(&root(), "/../../../etc/passwd"), Err(NotFound));
    }

    #[test]
    fn test_nested_traversal_is_rejected() {
        assert_eq!(resolve_target(&root(), "/a/../../etc/passwd"), Err(NotFound));
        assert_eq!(
            resolve_target(&root(), "/css/../../../etc/shadow"),
            Err(NotFound)
        );
    }

    #[test]
    fn test_traversal_within_root_is_allowed() {
        assert_eq!(
            resolve_target(&root(), "/css/../app.js"),
            Ok(PathBuf::from("/srv/www/app.js"))
        );
        assert_eq!(
            resolve_target(&root(), "/js/lib/../app.js"),
            Ok(PathBuf::from("/srv/www/js/app.js"))
        );
    }

    #[test]
    fn test_current_directory_segments_are_dropped() {
        assert_eq!(
            resolve_target(&root(), "/./a/./b.txt"),
            Ok(PathBuf::from("/srv/www/a/b.txt"))
        );
    }

    #[test]
    fn test_sibling_directory_with_shared_prefix_is_rejected() {
        // "/srv/www2" shares a byte prefix with the root but lies outside it.
        assert_eq!(resolve_target(&root(), "/../www2/secret"), Err(NotFound));
    }

    #[test]
    fn test_relative_target_without_leading_slash() {
        assert_eq!(
            resolve_target(&root(), "style.css"),
            Ok(PathBuf::from("/srv/www/style.css"))
        );
    }

    #[test]
    fn test_doubled_slashes_collapse() {
        assert_eq!(
            resolve_target(&root(), "//css//style.css"),
            Ok(PathBuf::from("/srv/www/css/style.css"))
        );
    }
}

#[cfg(test)]
mod traversal_over_tcp_tests {
    use super::*;

    async fn spawn_server(root: &Path) -> SocketAddr {
        let config = ServerConfig {
            port: 0,
            root: root.canonicalize().unwrap(),
        };
        let server = Server::bind(config).await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.serve());
        addr
    }

    async fn send_request(addr: SocketAddr, raw: &str) -> Vec<u8> {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_traversal_request_never_leaks_outside_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("secret.txt"), "top secret").unwrap();
        let root = outer.path().join("www");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("index.html"), "<h1>Hi</h1>").unwrap();

        let addr = spawn_server(&root).await;
        let response =
            send_request(addr, "GET /../secret.txt HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
        let text = String::from_utf8_lossy(&response);

        assert!(text.starts_with("HTTP/1.1 404 File Not Found\r\n"));
        assert!(!text.contains("top secret"));
    }

    #[tokio::test]
    async fn test_deep_traversal_is_still_404() {
        let dir = TempDir::new().unwrap();
        let addr = spawn_server(dir.path()).await;

        let response = send_request(
            addr,
            "GET /../../../../etc/passwd HTTP/1.1\r\nHost: localhost\r\n\r\n",
        )
        .await;
        let text = String::from_utf8_lossy(&response);

        assert!(text.starts_with("HTTP/1.1 404 File Not Found\r\n"));
        assert!(!text.contains("root:"));
    }

    #[tokio::test]
    async fn test_percent_encoded_traversal_is_not_decoded() {
        // No URL decoding happens anywhere, so the encoded target is just
        // a filename that does not exist.
        let dir = TempDir::new().unwrap();
        let addr = spawn_server(dir.path()).await;

        let response = send_request(
            addr,
            "GET /%2e%2e%2fetc%2fpasswd HTTP/1.1\r\nHost: localhost\r\n\r\n",
        )
        .await;
        let text = String::from_utf8_lossy(&response);

        assert!(text.starts_with("HTTP/1.1 404 File Not Found\r\n"));
    }
}
