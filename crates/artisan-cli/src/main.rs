// Shortcut Artisan CLI Entry Point

use artisan_cli::{output, router::CommandRouter};

fn main() {
    // Exit with appropriate code
    if let Err(e) = CommandRouter::route() {
        output::print_error(&e.user_message());
        std::process::exit(1);
    }
}
