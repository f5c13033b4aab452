//! > An HTTP Static File Server
//!
//! `file-serve` focuses on augmenting development of your site.  It prioritizes
//! small size and compile times over speed, scalability, or security.
//!
//! Sites deployed under a sub-path (`https://example.com/Notes/`) can be served the same way
//! with [`ServerBuilder::base_path`], and requests that miss can be answered with the site's own
//! not-found pages via [`ServerBuilder::not_found`].
//!
//! # Example
//!
//! ```rust,no_run
//! let path = std::env::current_dir().unwrap();
//! let server = file_serve::ServerBuilder::new(&path)
//!     .base_path("/Notes/")
//!     .not_found("", "404.html")
//!     .build();
//!
//! println!("Serving {}", path.display());
//! println!("See http://{}/Notes/", server.addr());
//! println!("Hit CTRL-C to stop");
//!
//! server.serve().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::{
    str::FromStr,
    sync::{RwLock, TryLockError},
};

const FALLBACK_NOT_FOUND: &str = "<h1> <center> 404: Page not found </center> </h1>";

/// Custom server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerBuilder {
    source: std::path::PathBuf,
    hostname: Option<String>,
    port: Option<u16>,
    base_path: String,
    not_found: Vec<NotFoundPage>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct NotFoundPage {
    /// Path prefix under the base path, without surrounding slashes
    prefix: String,
    /// Page, relative to the source
    file: std::path::PathBuf,
}

impl ServerBuilder {
    pub fn new(source: impl Into<std::path::PathBuf>) -> Self {
        Self {
            source: source.into(),
            hostname: None,
            port: None,
            base_path: String::new(),
            not_found: Vec::new(),
        }
    }

    /// Override the hostname
    pub fn hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Override the port
    ///
    /// By default, the first available port is selected.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Serve `source` under `base_path` rather than at the root
    pub fn base_path(&mut self, base_path: impl AsRef<str>) -> &mut Self {
        self.base_path = base_path.as_ref().trim_matches('/').to_owned();
        self
    }

    /// Answer misses under `prefix` with `file`
    ///
    /// `prefix` is relative to the base path; `""` covers everything.  When several prefixes
    /// match, the longest wins.
    pub fn not_found(
        &mut self,
        prefix: impl AsRef<str>,
        file: impl Into<std::path::PathBuf>,
    ) -> &mut Self {
        let prefix = prefix.as_ref().trim_matches('/').to_owned();
        let file = file.into();
        self.not_found.retain(|page| page.prefix != prefix);
        self.not_found.push(NotFoundPage { prefix, file });
        self
    }

    /// Create a server
    ///
    /// This is needed for accessing the dynamically assigned pot
    pub fn build(&self) -> Server {
        let source = self.source.clone();
        let hostname = self.hostname.as_deref().unwrap_or("localhost");
        let port = self
            .port
            .or_else(|| get_available_port(hostname))
            // Just have `serve` error out
            .unwrap_or(3000);

        Server {
            source,
            addr: format!("{hostname}:{port}"),
            base_path: self.base_path.clone(),
            not_found: self.not_found.clone(),
            server: RwLock::new(None),
        }
    }

    /// Start the webserver
    pub fn serve(&self) -> Result<(), Error> {
        self.build().serve()
    }
}

pub struct Server {
    source: std::path::PathBuf,
    addr: String,
    base_path: String,
    not_found: Vec<NotFoundPage>,
    server: RwLock<Option<tiny_http::Server>>,
}

/// What a request maps to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// An existing file
    File(std::path::PathBuf),
    /// Nothing matched; the page to answer with, if one was registered
    NotFound(Option<std::path::PathBuf>),
}

impl Server {
    /// Serve on first available port on localhost
    pub fn new(source: impl Into<std::path::PathBuf>) -> Self {
        ServerBuilder::new(source).build()
    }

    /// The location being served
    pub fn source(&self) -> &std::path::Path {
        self.source.as_path()
    }

    /// The address the server is available at
    ///
    /// This is useful for telling users how to access the served up files since the port is
    /// dynamically assigned by default.
    pub fn addr(&self) -> &str {
        self.addr.as_str()
    }

    /// URL of the site root, including the base path
    pub fn url(&self) -> String {
        if self.base_path.is_empty() {
            format!("http://{}/", self.addr)
        } else {
            format!("http://{}/{}/", self.addr, self.base_path)
        }
    }

    /// Whether the server was running at the instant the call happened
    pub fn is_running(&self) -> bool {
        matches!(self.server.read().as_deref(), Ok(Some(_)))
    }

    /// Map a request URL onto the source directory
    pub fn resolve(&self, url: &str) -> Resolved {
        // strip off any querystrings so path.is_file() matches and doesn't stick index.html on
        // the end of the path (querystrings often used for cachebusting)
        let req_path = url.split(['?', '#']).next().unwrap_or_default();

        let Some(rel) = strip_base_path(&self.base_path, req_path) else {
            return self.not_found_page("");
        };
        let rel = rel.trim_start_matches('/');
        if rel.split('/').any(|segment| segment == "..") {
            return self.not_found_page("");
        }

        let path = self.source.join(rel);
        let serve_path = if path.is_file() {
            path
        } else {
            path.join("index.html")
        };

        if serve_path.is_file() {
            Resolved::File(serve_path)
        } else {
            self.not_found_page(rel)
        }
    }

    fn not_found_page(&self, rel: &str) -> Resolved {
        let rel = rel.trim_end_matches('/');
        let page = self
            .not_found
            .iter()
            .filter(|page| has_prefix(rel, &page.prefix))
            .max_by_key(|page| page.prefix.len())
            .map(|page| self.source.join(&page.file));
        Resolved::NotFound(page)
    }

    /// Start the webserver
    pub fn serve(&self) -> Result<(), Error> {
        match self.server.try_write().as_deref_mut() {
            Ok(server @ None) => {
                // attempts to create a server
                *server = Some(tiny_http::Server::http(self.addr()).map_err(Error::new)?);
            }
            Ok(Some(_)) | Err(TryLockError::WouldBlock) => {
                return Err(Error::new("the server is running"));
            }
            Err(error @ TryLockError::Poisoned(_)) => return Err(Error::new(error)),
        }

        {
            let server = self.server.read().map_err(Error::new)?;
            if let Some(server) = server.as_ref() {
                for request in server.incoming_requests() {
                    // handles the request
                    if let Err(e) = self.handle(request) {
                        log::error!("{e}");
                    }
                }
            }
        }

        *self.server.write().map_err(Error::new)? = None;

        Ok(())
    }

    /// Closes the server gracefully
    pub fn close(&self) {
        if let Ok(Some(server)) = self.server.read().as_deref() {
            server.unblock();
        }
    }

    fn handle(&self, req: tiny_http::Request) -> Result<(), Error> {
        match self.resolve(req.url()) {
            Resolved::File(serve_path) => {
                log::trace!("{} -> {}", req.url(), serve_path.display());
                let file = std::fs::File::open(&serve_path).map_err(Error::new)?;
                let mut response = tiny_http::Response::from_file(file);
                if let Some(mime) = mime_guess::MimeGuess::from_path(&serve_path).first_raw() {
                    response.add_header(content_type(mime)?);
                }
                req.respond(response).map_err(Error::new)?;
            }
            Resolved::NotFound(page) => {
                log::debug!("{} not found", req.url());
                let body = match page {
                    Some(page) => std::fs::read(&page).unwrap_or_else(|e| {
                        log::warn!("Failed to read {}: {e}", page.display());
                        FALLBACK_NOT_FOUND.as_bytes().to_vec()
                    }),
                    None => FALLBACK_NOT_FOUND.as_bytes().to_vec(),
                };
                req.respond(
                    tiny_http::Response::from_data(body)
                        .with_status_code(404)
                        .with_header(content_type("text/html; charset=utf-8")?),
                )
                .map_err(Error::new)?;
            }
        }

        Ok(())
    }
}

/// Serve Error
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(fmt)
    }
}

impl std::error::Error for Error {}

fn content_type(mime: &str) -> Result<tiny_http::Header, Error> {
    tiny_http::Header::from_str(&format!("Content-Type:{mime}"))
        .map_err(|()| Error::new(format!("invalid content type `{mime}`")))
}

/// The part of `path` under `base`, if it is under `base` at all
fn strip_base_path<'p>(base: &str, path: &'p str) -> Option<&'p str> {
    if base.is_empty() {
        return Some(path);
    }
    let rest = path.trim_start_matches('/').strip_prefix(base)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

fn has_prefix(rel: &str, prefix: &str) -> bool {
    prefix.is_empty()
        || rel
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn get_available_port(host: &str) -> Option<u16> {
    // Start after "well-known" ports (0-1023) as they require superuser
    // privileges on UNIX-like operating systems.
    (1024..9000).find(|port| port_is_available(host, *port))
}

fn port_is_available(host: &str, port: u16) -> bool {
    std::net::TcpListener::bind((host, port)).is_ok()
}
