// SPDX-License-Identifier: MPL-2.0
//! Gift unwrap stages.

/// Stages of the gift reveal, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum UnwrapStage {
    #[default]
    Closed,
    BowUndone,
    LidOpen,
    TicketRevealed,
}

impl UnwrapStage {
    /// The stage an activation leads to, or `None` when terminal.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            UnwrapStage::Closed => Some(UnwrapStage::BowUndone),
            UnwrapStage::BowUndone => Some(UnwrapStage::LidOpen),
            UnwrapStage::LidOpen => Some(UnwrapStage::TicketRevealed),
            UnwrapStage::TicketRevealed => None,
        }
    }

    #[must_use]
    pub fn instruction(self) -> &'static str {
        match self {
            UnwrapStage::Closed => "Tap to untie the bow!",
            UnwrapStage::BowUndone => "Tap to open the lid!",
            UnwrapStage::LidOpen => "Tap to reveal your gift!",
            UnwrapStage::TicketRevealed => "Enjoy your surprise! 🎫",
        }
    }

    /// Present artwork for the stage, relative to the asset directory.
    #[must_use]
    pub fn present_artwork(self) -> &'static str {
        match self {
            UnwrapStage::Closed => "present1.png",
            UnwrapStage::BowUndone => "present2_bow_undone.png",
            UnwrapStage::LidOpen | UnwrapStage::TicketRevealed => "present3_lid_open.png",
        }
    }

    /// Ticket artwork, shown only once revealed.
    #[must_use]
    pub fn ticket_artwork(self) -> Option<&'static str> {
        (self == UnwrapStage::TicketRevealed).then_some("ticket2.png")
    }
}

/// Snapshot of the unwrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnwrapState {
    pub stage: UnwrapStage,
    /// Incremented on every re-entry reset.
    pub reset_token: u64,
}
