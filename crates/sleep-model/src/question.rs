//! The fixed question schema of the sleep diary.
//!
//! Answers arrive as a positional array; the position of an answer is the only
//! thing linking it to its question. [`Question::ALL`] is that ordering.

use std::fmt;

/// One question of the daily sleep diary, in the order answers are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Question {
    /// What time did you get into bed?
    TimeGotIntoBed,
    /// What time did you try to go to sleep?
    TimeTriedToSleep,
    /// How long did it take you to fall asleep? (minutes)
    TimeToFallAsleepMins,
    /// How many times did you wake up, not counting your final awakening?
    TimesWokeUpCount,
    /// In total, how long did these awakenings last? (minutes)
    TotalAwakeTimeMins,
    /// Final awakening time and minutes spent in bed afterwards.
    FinalAwakeningDetails,
    /// What time did you get out of bed for the day?
    TimeGotOutOfBed,
    /// How would you rate the quality of your sleep?
    SleepQualityRating,
    MedicationSleepAids,
    CaffeineAlcohol1,
    CaffeineAlcohol2,
    CaffeineAlcohol3,
    AdditionalNotes,
}

/// Field derived from the first element of the final awakening pair.
pub const FINAL_AWAKENING_TIME: &str = "final_awakening_time";

/// Field derived from the second element of the final awakening pair.
pub const TIME_IN_BED_AFTER_FINAL_AWAKENING_MINS: &str = "time_in_bed_after_final_awakening_mins";

impl Question {
    /// Every question, indexed by answer position.
    pub const ALL: [Question; 13] = [
        Self::TimeGotIntoBed,
        Self::TimeTriedToSleep,
        Self::TimeToFallAsleepMins,
        Self::TimesWokeUpCount,
        Self::TotalAwakeTimeMins,
        Self::FinalAwakeningDetails,
        Self::TimeGotOutOfBed,
        Self::SleepQualityRating,
        Self::MedicationSleepAids,
        Self::CaffeineAlcohol1,
        Self::CaffeineAlcohol2,
        Self::CaffeineAlcohol3,
        Self::AdditionalNotes,
    ];

    /// Question answered at `position`, or `None` past the end of the schema.
    #[must_use]
    pub fn at(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// Field name used in flat and storage records.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::TimeGotIntoBed => "time_got_into_bed",
            Self::TimeTriedToSleep => "time_tried_to_sleep",
            Self::TimeToFallAsleepMins => "time_to_fall_asleep_mins",
            Self::TimesWokeUpCount => "times_woke_up_count",
            Self::TotalAwakeTimeMins => "total_awake_time_mins",
            Self::FinalAwakeningDetails => "final_awakening_details",
            Self::TimeGotOutOfBed => "time_got_out_of_bed",
            Self::SleepQualityRating => "sleep_quality_rating",
            Self::MedicationSleepAids => "medication_sleep_aids",
            Self::CaffeineAlcohol1 => "caffeine_alcohol_1",
            Self::CaffeineAlcohol2 => "caffeine_alcohol_2",
            Self::CaffeineAlcohol3 => "caffeine_alcohol_3",
            Self::AdditionalNotes => "additional_notes",
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
