//! Tests for mood values and check-in records.

use crate::ledger::domain::UserId;
use crate::mood::{
    domain::{Mood, MoodKind, NewMood, ParseMoodKindError},
    ports::MoodRequest,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("great", MoodKind::Great)]
#[case("good", MoodKind::Good)]
#[case(" Okay ", MoodKind::Okay)]
#[case("NOT_GREAT", MoodKind::NotGreat)]
#[case("struggling", MoodKind::Struggling)]
fn mood_values_parse_case_insensitively(#[case] raw: &str, #[case] expected: MoodKind) {
    assert_eq!(MoodKind::try_from(raw), Ok(expected));
}

#[rstest]
#[case("")]
#[case("not great")]
#[case("ecstatic")]
fn unknown_mood_values_are_rejected(#[case] raw: &str) {
    assert_eq!(
        MoodKind::try_from(raw),
        Err(ParseMoodKindError(raw.to_owned()))
    );
}

#[rstest]
fn storage_names_parse_back() {
    for kind in MoodKind::ALL {
        assert_eq!(MoodKind::try_from(kind.as_str()), Ok(kind));
    }
}

#[rstest]
#[case(MoodKind::Great, None, "The user is feeling great.")]
#[case(MoodKind::Okay, None, "The user is feeling okay.")]
#[case(
    MoodKind::Struggling,
    Some("deadline tomorrow"),
    "The user is struggling. They shared: \"deadline tomorrow\""
)]
fn responder_context_describes_the_check_in(
    #[case] mood: MoodKind,
    #[case] note: Option<&str>,
    #[case] expected: &str,
) {
    let request = MoodRequest::new(mood, note.map(str::to_owned));

    assert_eq!(request.context(), expected);
}

#[rstest]
#[case(Some("  slept well  "), Some("slept well"))]
#[case(Some("   "), None)]
#[case(None, None)]
fn notes_are_trimmed_and_blank_ones_dropped(
    #[case] note: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let mood = Mood::new(
        NewMood {
            owner: UserId::new(),
            mood: MoodKind::Good,
            note: note.map(str::to_owned),
            ai_response: "Nice.".to_owned(),
        },
        &DefaultClock,
    );

    assert_eq!(mood.note(), expected);
}
