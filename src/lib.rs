/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and legality.
mod board;

/// Contract for external move suppliers.
mod bot;

/// Commands accepted by the engine's command loop.
mod cli;

/// The command loop driving a game over stdin.
mod engine;

pub use board::*;
pub use bot::*;
pub use cli::*;
pub use engine::*;
