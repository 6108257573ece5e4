use colored::*;

use super::print;

const BANNER: &str = r#"
     ___  ___  ___ __  ____   _____ ___ ___  ___ ___
    | _ \| _ \/ _ \\ \/ /\ \ / / __/ __/ _ \| _ \ __|
    |  _/|   / (_) |>  <  \ V /\__ \ (_| (_) |  _/ _|
    |_|  |_|_\\___//_/\_\  |_| |___/\___\___/|_| |___|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_blue()));
}
