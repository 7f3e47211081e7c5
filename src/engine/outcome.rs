//! Result of a single play.

/// What happened when a user pulled the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The user drew the loaded chamber.
    Shot {
        /// Streak the user held right before the shot.
        previous_streak: u64,
        /// Moderation timeout to issue.
        timeout_seconds: u32,
        /// Whether the pre-shot streak set a new channel record.
        record_broken: bool,
        /// Shots taken today after this one (limited mode only).
        shots_taken: Option<u8>,
        /// Whether this shot used up the user's daily allowance.
        blocked_now: bool,
    },
    /// The user survived.
    Survived {
        /// Streak after this survival.
        streak: u64,
        /// Whether the new streak set a channel record.
        record_broken: bool,
    },
    /// Limited mode only: the user has no shots left today. Nothing was drawn.
    Blocked {
        /// Shots taken today.
        shots_taken: u8,
    },
}

impl PlayOutcome {
    /// Label used for metrics and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Shot { .. } => "shot",
            Self::Survived { .. } => "survived",
            Self::Blocked { .. } => "blocked",
        }
    }

    /// Returns `true` for [`PlayOutcome::Shot`].
    #[must_use]
    pub const fn is_shot(&self) -> bool {
        matches!(self, Self::Shot { .. })
    }

    /// Returns `true` for [`PlayOutcome::Blocked`].
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Whether the play set a new channel record.
    #[must_use]
    pub const fn record_broken(&self) -> bool {
        match self {
            Self::Shot { record_broken, .. } | Self::Survived { record_broken, .. } => {
                *record_broken
            }
            Self::Blocked { .. } => false,
        }
    }

    /// The user's streak after the play, where one applies.
    #[must_use]
    pub const fn streak(&self) -> Option<u64> {
        match self {
            Self::Shot { .. } => Some(0),
            Self::Survived { streak, .. } => Some(*streak),
            Self::Blocked { .. } => None,
        }
    }
}
