use anchor_lang::prelude::*;

/// Result type for the pure accounting helpers (no Anchor context involved).
pub type VestingResult<T> = core::result::Result<T, VestingError>;

/// Custom error codes for the phase vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Unauthorized: only the recipient or the admin may release")]
    UnauthorizedReleaser,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid phase parameters")]
    InvalidPhase,

    #[msg("Phase not found")]
    PhaseNotFound,

    #[msg("Schedule not found")]
    ScheduleNotFound,

    #[msg("Recipient already holds a schedule in this phase")]
    DuplicateSchedule,

    #[msg("Recipient schedule list is full")]
    RecipientScheduleListFull,

    #[msg("Invalid allocation (must be > 0)")]
    InvalidAllocation,

    #[msg("Cliff percent must be within 0..=1000 tenths")]
    InvalidCliffPercent,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Requested amount exceeds the releasable amount")]
    InsufficientReleasable,

    #[msg("Requested amount exceeds the pool balance")]
    InsufficientPoolBalance,

    #[msg("Withdrawal would touch units still owed to recipients")]
    SurplusExceeded,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
