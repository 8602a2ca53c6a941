use clikit::decoder::KeyDecoder;
use clikit::term::crossterm::CrosstermBackend;
use clikit::{Capabilities, KeyEvent, TerminalBackend};

fn main() -> clikit::Result<()> {
    let caps = Capabilities::detect();
    let decoder = KeyDecoder::new(caps);
    let mut term = CrosstermBackend::new()?;
    term.init()?;

    term.write_str(&format!("Capabilities: {caps:?}\r\nPress keys, ESC or CTRL+C to stop.\r\n"))?;
    term.flush()?;

    loop {
        let key = decoder.decode(&mut term)?;
        term.write_str(&format!("{key:?}\r\n"))?;
        term.flush()?;
        if key == KeyEvent::Cancel {
            break;
        }
    }

    term.deinit();
    Ok(())
}
