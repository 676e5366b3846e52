//! Dialogue state machine
//!
//! Every chat is in exactly one state. Menu states fan out into flows;
//! flow states form linear chains that end in a generation step and drop
//! back to the action menu. `/start` resets any state to `MainMenu`.

use serde::{Deserialize, Serialize};

/// Dialogue states, one per conversation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogState {
    /// Entry menu: fill in the profile or continue without it
    MainMenu,
    /// Main action menu
    ActionMenu,

    // Profile onboarding (each step skippable)
    ProfileName,
    ProfileDescription,
    ProfileActivity,

    /// Text generation sub-menu
    TextTypeMenu,

    // Post from an idea
    PostTopic,
    PostAspect,
    PostRelevance,

    // Event announcement
    EventName,
    EventDate,
    EventLocation,
    EventAudience,
    EventDetails,

    /// Post in the style of an example
    PostExample,

    // Image generation
    ImageSubject,
    ImageBackground,
    ImageStyle,

    // Content plan
    PlanPeriod,
    PlanTheme,
    PlanGoals,

    /// Proofreading
    TextEdit,
}

impl DialogState {
    /// Next step within a linear flow chain; `None` for menus and for
    /// final steps, which transition back to `ActionMenu` themselves.
    pub fn advance(&self) -> Option<DialogState> {
        use DialogState::*;

        match self {
            ProfileName => Some(ProfileDescription),
            ProfileDescription => Some(ProfileActivity),

            PostTopic => Some(PostAspect),
            PostAspect => Some(PostRelevance),

            EventName => Some(EventDate),
            EventDate => Some(EventLocation),
            EventLocation => Some(EventAudience),
            EventAudience => Some(EventDetails),

            ImageSubject => Some(ImageBackground),
            ImageBackground => Some(ImageStyle),

            PlanPeriod => Some(PlanTheme),
            PlanTheme => Some(PlanGoals),

            _ => None,
        }
    }

    /// States where the cancel button aborts the flow back to the menu
    pub fn accepts_cancel(&self) -> bool {
        use DialogState::*;
        matches!(
            self,
            PostTopic | ImageSubject | ImageBackground | ImageStyle | PlanPeriod | PlanTheme | PlanGoals
        )
    }

    /// Profile steps where the skip button stores an empty field
    pub fn accepts_skip(&self) -> bool {
        use DialogState::*;
        matches!(self, ProfileName | ProfileDescription | ProfileActivity)
    }

    /// Final step of a flow: consumes its input and issues a generation
    /// request (or, for the profile, persists it)
    pub fn is_final_step(&self) -> bool {
        use DialogState::*;
        matches!(
            self,
            ProfileActivity | PostRelevance | EventDetails | PostExample | ImageStyle | PlanGoals | TextEdit
        )
    }
}
