//! shiftlink main entrypoint.

use shiftlink::run;
use shiftlink::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
