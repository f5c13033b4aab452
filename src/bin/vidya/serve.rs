use std::path;
use std::process;
use std::sync::mpsc::channel;
use std::thread;

use anyhow::Context as _;
use notify::Watcher as _;

use crate::args;
use crate::build;
use crate::error::Result;

/// Build, serve, and watch the site
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ServeArgs {
    /// Open a browser
    #[arg(long)]
    pub(crate) open: bool,

    /// Host to serve from
    #[arg(long, value_name = "HOSTNAME_OR_IP", default_value = "localhost")]
    pub(crate) host: String,

    /// Port to serve from
    #[arg(short = 'P', long, value_name = "NUM")]
    pub(crate) port: Option<u16>,

    /// Disable rebuilding on change
    #[arg(long)]
    pub(crate) no_watch: bool,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl ServeArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let dest = tempfile::tempdir()?;

        let config = self.config.load_config()?;
        log::debug!(
            "Overriding config `destination` with `{}`",
            dest.path().display()
        );
        let config = config.with_destination(dest.path());
        build::build(&config)?;

        let mut server = file_serve::ServerBuilder::new(dest.path());
        server.hostname(&self.host);
        if let Some(port) = self.port {
            server.port(port);
        }
        server.base_path(&config.site.base_url);
        for locale in &config.site.i18n.locales {
            let prefix = config.site.i18n.locale_prefix(locale).unwrap_or_default();
            let page = path::Path::new(prefix).join(vidya::site::NOT_FOUND_FILE);
            server.not_found(prefix, page);
        }
        let server = server.build();

        if self.open {
            open_browser(server.url())?;
        }

        if self.no_watch {
            serve(&server)?;

            dest.close()?;
        } else {
            thread::spawn(move || {
                let e = serve(&server);
                if let Some(e) = e.err() {
                    log::error!("{e}");
                }
                process::exit(1)
            });

            watch(&config)?;
        }

        Ok(())
    }
}

fn serve(server: &file_serve::Server) -> Result<()> {
    log::info!(
        "Serving {} through static file server",
        server.source().display()
    );
    log::info!("Server Listening on {}", server.url());
    log::info!("Ctrl-c to stop the server");

    Ok(server.serve()?)
}

fn open_browser(url: String) -> Result<()> {
    match open::that(url) {
        Ok(()) => log::info!("Please check your browser!"),
        Err(why) => log::error!("Failure to execute command: {why}"),
    }
    Ok(())
}

fn watch(config: &vidya::Config) -> Result<()> {
    // canonicalize so the paths `watcher` reports can be compared against the destination
    let source = dunce::canonicalize(&config.source).with_context(|| {
        anyhow::format_err!("Failed in processing source `{}`", config.source.display())
    })?;

    // notify-rs builds absolute paths from the canonical source, so match that form
    let destination = dunce::canonicalize(&config.destination).with_context(|| {
        anyhow::format_err!(
            "Failed to canonicalize destination folder `{}`",
            config.destination.display()
        )
    })?;

    let (tx, rx) = channel();
    let mut watcher =
        notify::recommended_watcher(tx).with_context(|| anyhow::format_err!("Notify error"))?;
    watcher
        .watch(&source, notify::RecursiveMode::Recursive)
        .with_context(|| anyhow::format_err!("Notify error"))?;
    log::info!("Watching {} for changes", config.source.display());

    for event in rx {
        let event = event.with_context(|| anyhow::format_err!("Notify error"))?;
        let event_paths = match event.kind {
            notify::EventKind::Create(_)
            | notify::EventKind::Modify(_)
            | notify::EventKind::Remove(_) => {
                log::trace!("Noticed {:?} for {:#?}", event.kind, event.paths);
                &event.paths
            }
            _ => {
                continue;
            }
        };
        let rebuild = event_paths.iter().any(|event_path| {
            if event_path.starts_with(&destination) {
                log::trace!("Ignored file changed {event:?}");
                false
            } else {
                log::debug!("Source changed {event:?}");
                true
            }
        });
        if rebuild {
            // Config changes only take effect on restart
            if let Err(fail) = build::build(config) {
                log::error!("build failed\n{fail:?}");
            }
        }
    }

    Ok(())
}
