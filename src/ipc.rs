use std::io::BufRead;
use std::os::unix::net::UnixListener;

use futures::channel::mpsc;

use modal_loader::command::{Command, socket_path};

/// Accept control connections on a background thread, one command per connection.
///
/// Fails if the socket cannot be bound. Unparseable lines are logged and dropped.
pub(crate) fn socket_listener() -> std::io::Result<mpsc::UnboundedReceiver<Command>> {
    let path = socket_path();
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path)?;
    tracing::info!(path = %path.display(), "listening");

    let (tx, rx) = mpsc::unbounded();
    std::thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let Some(cmd) = read_command(std::io::BufReader::new(stream)) else {
                continue;
            };
            if tx.unbounded_send(cmd).is_err() {
                return;
            }
        }
    });
    Ok(rx)
}

/// Read the first line of a connection. Anything after it is ignored.
fn read_command(mut reader: impl BufRead) -> Option<Command> {
    let mut buf = String::new();
    reader.read_line(&mut buf).ok()?;
    if buf.trim().is_empty() {
        return None;
    }
    match Command::parse(&buf) {
        Ok(cmd) => Some(cmd),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}
