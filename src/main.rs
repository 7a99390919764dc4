/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use skewer::{Engine, EngineCommand};

fn main() {
    let mut engine = Engine::new();

    // A command supplied on the command line runs before stdin is read,
    // e.g. `skewer moves` or `skewer position <FEN>`.
    let args = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !args.trim().is_empty() {
        match EngineCommand::from_str(args.trim()) {
            Ok(command) => {
                if !engine.execute(command) {
                    return;
                }
            }
            Err(e) => {
                println!("{e}");
                return;
            }
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
