use std::io::Write;
use std::os::unix::net::UnixStream;
use std::process;

use modal_loader::command::{Command, socket_path};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        process::exit(1);
    }

    let cmd = args.join(" ");
    if let Err(e) = Command::parse(&cmd) {
        eprintln!("{e}");
        usage();
        process::exit(1);
    }

    let path = socket_path();
    let mut stream = match UnixStream::connect(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("modal-loader not running ({path:?}): {e}");
            process::exit(1);
        }
    };

    if let Err(e) = writeln!(stream, "{cmd}") {
        eprintln!("failed to send command: {e}");
        process::exit(1);
    }
}

fn usage() {
    eprintln!("usage: modal-loader-ctl <command>");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  click <json>                      click an element with these attributes");
    eprintln!("  close [dismiss|backdrop|escape]   close the overlay");
    eprintln!("  state                             print the overlay state");
    eprintln!();
    eprintln!("example:");
    eprintln!(r#"  modal-loader-ctl click '{{"class": "load-in-modal", "href": "/about"}}'"#);
}
