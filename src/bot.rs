/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    sync::mpsc::{channel, Receiver},
    thread,
};

use crate::{Move, Position};

/// A supplier of moves for the side to move in a given position.
///
/// Implementors look at a [`Position`] snapshot, as the color whose turn it
/// is, and return a move they would like to make, drawn from
/// [`Position::legal_moves`]. Returning `None` means no move was chosen
/// (for instance because none exist).
///
/// The engine imposes no timeout and offers no cancellation; a supplier may
/// take arbitrarily long. It also does not re-validate the returned move —
/// callers applying a bot's choice are expected to screen it through
/// [`Position::can_move`] first, exactly as they would a human's input.
pub trait Bot {
    /// Chooses a move to play in `position`.
    fn choose_move(&mut self, position: Position) -> Option<Move>;
}

/// Hands a [`Position`] snapshot to `bot` on a background thread and returns
/// the receiving end of a channel that will yield its choice.
///
/// The caller is free to keep serving input while the bot deliberates.
///
/// # Example
/// ```
/// # use skewer::{request_move, Bot, Move, Position};
/// struct First;
///
/// impl Bot for First {
///     fn choose_move(&mut self, mut position: Position) -> Option<Move> {
///         position.legal_moves().first().copied()
///     }
/// }
///
/// let pos = Position::default();
/// let rx = request_move(First, pos.clone());
/// let mv = rx.recv().unwrap().unwrap();
/// assert!(pos.clone().can_move(mv));
/// ```
pub fn request_move<B: Bot + Send + 'static>(
    mut bot: B,
    position: Position,
) -> Receiver<Option<Move>> {
    let (sender, receiver) = channel();

    thread::spawn(move || {
        // A dropped receiver just discards the choice.
        let _ = sender.send(bot.choose_move(position));
    });

    receiver
}
