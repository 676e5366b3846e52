//! Dialogue handlers
//!
//! One handler per state. Handlers mutate the session, persist records
//! where a flow completes, and return the outgoing replies; the polling
//! loop does the actual sending. A chat with no session only reacts to
//! `/start`.

use crate::dialog::keyboards;
use crate::dialog::session::{Session, SessionStore};
use crate::dialog::state::DialogState;
use crate::dialog::texts;
use crate::dialog::{ContentGenerator, Reply};
use crate::errors::{BotError, Result};
use crate::gigachat::prompts;
use crate::storage::Storage;
use crate::telegram::{split_message, MAX_MESSAGE_LEN};
use crate::types::{
    ContentPlanRequest, EventInfo, GenerationKind, ImageRequest, NgoProfile, PostExample, PostIdea,
    TextEditRequest,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Pause between content-plan parts so long plans arrive readably
const PLAN_PART_DELAY: Duration = Duration::from_millis(500);

/// Filename the welcome photo is uploaded under
const WELCOME_PHOTO_NAME: &str = "welcome.jpg";

/// Filename generated images are uploaded under
const GENERATED_PHOTO_NAME: &str = "generated_image.jpg";

/// The dialogue engine
pub struct Dialog {
    generator: Arc<dyn ContentGenerator>,
    storage: Storage,
    sessions: SessionStore,
    welcome_image: Option<PathBuf>,
}

impl Dialog {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        storage: Storage,
        welcome_image: Option<PathBuf>,
    ) -> Self {
        Self {
            generator,
            storage,
            sessions: SessionStore::new(),
            welcome_image,
        }
    }

    /// Handle one incoming text message and return the replies to send
    pub async fn handle(&self, chat_id: i64, user_id: i64, text: &str) -> Result<Vec<Reply>> {
        if text == "/start" {
            return Ok(self.on_start(chat_id).await);
        }

        let mut session = match self.sessions.snapshot(chat_id).await {
            Some(session) => session,
            // Only /start opens a dialogue
            None => return Ok(Vec::new()),
        };

        let replies = self.dispatch(&mut session, user_id, text).await?;
        self.sessions.store(chat_id, session).await;
        Ok(replies)
    }

    async fn dispatch(&self, session: &mut Session, user_id: i64, text: &str) -> Result<Vec<Reply>> {
        use DialogState::*;

        let replies = match session.state {
            MainMenu => self.on_main_menu(session, text),
            ActionMenu => self.on_action_menu(session, text),
            ProfileName | ProfileDescription | ProfileActivity => {
                self.on_profile_step(session, user_id, text)?
            }
            TextTypeMenu => self.on_text_type_menu(session, text),

            PostTopic => self.on_post_topic(session, text),
            PostAspect => self.on_post_aspect(session, text),
            PostRelevance => self.on_post_relevance(session, user_id, text).await,

            EventName | EventDate | EventLocation | EventAudience => {
                self.on_event_step(session, text)?
            }
            EventDetails => self.on_event_details(session, user_id, text).await,

            PostExample => self.on_post_example(session, user_id, text).await,

            ImageSubject | ImageBackground => self.on_image_step(session, text)?,
            ImageStyle => self.on_image_style(session, user_id, text).await,

            PlanPeriod | PlanTheme => self.on_plan_step(session, text)?,
            PlanGoals => self.on_plan_goals(session, user_id, text).await,

            TextEdit => self.on_text_edit(session, user_id, text).await,
        };

        Ok(replies)
    }

    /// `/start`: reset the dialogue, send the welcome photo and greeting
    async fn on_start(&self, chat_id: i64) -> Vec<Reply> {
        self.sessions.reset(chat_id).await;

        let mut replies = Vec::new();

        if let Some(path) = &self.welcome_image {
            match std::fs::read(path) {
                Ok(bytes) => replies.push(Reply::photo(bytes, WELCOME_PHOTO_NAME, None, None)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "welcome image unavailable");
                }
            }
        }

        replies.push(Reply::with_keyboard(texts::WELCOME, keyboards::main_menu()));
        replies
    }

    fn on_main_menu(&self, session: &mut Session, text: &str) -> Vec<Reply> {
        match text {
            texts::BTN_FILL_PROFILE => {
                session.draft.clear();
                session.state = DialogState::ProfileName;
                vec![Reply::with_keyboard(texts::PROFILE_INTRO, keyboards::skip())]
            }
            texts::BTN_SKIP_PROFILE => {
                session.state = DialogState::ActionMenu;
                vec![
                    Reply::text(texts::CONTINUE_WITHOUT_DATA),
                    Reply::with_keyboard(texts::GOTO_ACTIONS, keyboards::actions()),
                ]
            }
            _ => vec![Reply::with_keyboard(texts::CHOOSE_OPTION, keyboards::main_menu())],
        }
    }

    fn on_action_menu(&self, session: &mut Session, text: &str) -> Vec<Reply> {
        match text {
            texts::BTN_GENERATE_TEXT => {
                session.state = DialogState::TextTypeMenu;
                vec![Reply::with_keyboard(texts::CHOOSE_TEXT_TYPE, keyboards::text_types())]
            }
            texts::BTN_MAKE_IMAGE => {
                session.draft.clear();
                session.state = DialogState::ImageSubject;
                vec![Reply::with_keyboard(texts::ASK_IMAGE_SUBJECT, keyboards::cancel())]
            }
            texts::BTN_CONTENT_PLAN => {
                session.draft.clear();
                session.state = DialogState::PlanPeriod;
                vec![Reply::with_keyboard(texts::ASK_PLAN_PERIOD, keyboards::cancel())]
            }
            texts::BTN_TEXT_EDITOR => {
                session.state = DialogState::TextEdit;
                vec![Reply::with_keyboard(texts::ASK_TEXT_TO_EDIT, keyboards::cancel())]
            }
            texts::BTN_BACK => {
                session.state = DialogState::MainMenu;
                vec![Reply::with_keyboard(texts::BACK_TO_MAIN, keyboards::main_menu())]
            }
            _ => vec![Reply::with_keyboard(texts::CHOOSE_OPTION, keyboards::actions())],
        }
    }

    fn on_profile_step(&self, session: &mut Session, user_id: i64, text: &str) -> Result<Vec<Reply>> {
        let skipped = text == texts::BTN_SKIP;
        let value = if skipped { None } else { Some(text.to_string()) };

        let replies = match session.state {
            DialogState::ProfileName => {
                session.draft.profile.org_name = value;
                let ack = if skipped {
                    Reply::text(texts::PROFILE_NAME_SKIPPED)
                } else {
                    Reply::text(format!("✅ Название сохранено: {}", text))
                };
                session.state = DialogState::ProfileDescription;
                vec![
                    ack,
                    Reply::with_keyboard(texts::PROFILE_ASK_DESCRIPTION, keyboards::skip()),
                ]
            }
            DialogState::ProfileDescription => {
                session.draft.profile.org_description = value;
                let ack = if skipped {
                    Reply::text(texts::PROFILE_DESCRIPTION_SKIPPED)
                } else {
                    Reply::text(texts::PROFILE_DESCRIPTION_SAVED)
                };
                session.state = DialogState::ProfileActivity;
                vec![
                    ack,
                    Reply::with_keyboard(texts::PROFILE_ASK_ACTIVITY, keyboards::skip()),
                ]
            }
            DialogState::ProfileActivity => {
                session.draft.profile.org_activity = value;
                let ack = if skipped {
                    Reply::text(texts::PROFILE_ACTIVITY_SKIPPED)
                } else {
                    Reply::text(texts::PROFILE_ACTIVITY_SAVED)
                };

                let profile = std::mem::take(&mut session.draft.profile);
                session.profile = Some(profile.clone());
                session.state = DialogState::ActionMenu;

                let outcome = match self.storage.save_profile(user_id, &profile) {
                    Ok(_) => texts::PROFILE_SAVED,
                    Err(e) => {
                        tracing::error!(user_id, error = %e, "failed to save profile");
                        texts::PROFILE_SAVE_FAILED
                    }
                };

                vec![ack, Reply::with_keyboard(outcome, keyboards::actions())]
            }
            other => return Err(Self::wrong_state(other, "profile")),
        };

        Ok(replies)
    }

    fn on_text_type_menu(&self, session: &mut Session, text: &str) -> Vec<Reply> {
        match text {
            texts::BTN_POST_BY_IDEA => {
                session.draft.clear();
                session.state = DialogState::PostTopic;
                vec![Reply::with_keyboard(texts::ASK_POST_TOPIC, keyboards::cancel())]
            }
            texts::BTN_POST_FOR_EVENT => {
                session.draft.clear();
                session.state = DialogState::EventName;
                vec![Reply::with_keyboard(texts::ASK_EVENT_NAME, keyboards::cancel())]
            }
            texts::BTN_POST_BY_EXAMPLE => {
                session.draft.clear();
                session.state = DialogState::PostExample;
                vec![Reply::with_keyboard(texts::ASK_POST_EXAMPLE, keyboards::cancel())]
            }
            texts::BTN_BACK_TO_MENU => {
                session.state = DialogState::ActionMenu;
                vec![Reply::with_keyboard(texts::BACK_TO_ACTIONS, keyboards::actions())]
            }
            _ => vec![Reply::with_keyboard(texts::CHOOSE_FROM_MENU, keyboards::text_types())],
        }
    }

    fn on_post_topic(&self, session: &mut Session, text: &str) -> Vec<Reply> {
        if session.state.accepts_cancel() && text == texts::BTN_CANCEL {
            session.state = DialogState::ActionMenu;
            return vec![Reply::with_keyboard(texts::CANCEL_TEXT_GEN, keyboards::actions())];
        }

        session.draft.topic = Some(text.to_string());
        session.state = DialogState::PostAspect;
        vec![Reply::text(texts::ASK_POST_ASPECT)]
    }

    fn on_post_aspect(&self, session: &mut Session, text: &str) -> Vec<Reply> {
        session.draft.aspect = Some(text.to_string());
        session.state = DialogState::PostRelevance;
        vec![Reply::text(texts::ASK_POST_RELEVANCE)]
    }

    async fn on_post_relevance(&self, session: &mut Session, user_id: i64, text: &str) -> Vec<Reply> {
        let idea = PostIdea {
            topic: session.draft.topic.take().unwrap_or_default(),
            aspect: session.draft.aspect.take().unwrap_or_default(),
            relevance: text.to_string(),
        };

        self.save_record(user_id, GenerationKind::PostIdea, &idea);

        let profile = self.profile_for(session, user_id);
        let prompt = prompts::with_profile_context(&prompts::post_from_idea(&idea), profile.as_ref());

        session.state = DialogState::ActionMenu;
        self.generated_text_reply(texts::GENERATED_TEXT_HEADER, &prompt).await
    }

    fn on_event_step(&self, session: &mut Session, text: &str) -> Result<Vec<Reply>> {
        let ask = match session.state {
            DialogState::EventName => {
                session.draft.event_name = Some(text.to_string());
                texts::ASK_EVENT_DATE
            }
            DialogState::EventDate => {
                session.draft.event_date = Some(text.to_string());
                texts::ASK_EVENT_LOCATION
            }
            DialogState::EventLocation => {
                session.draft.event_location = Some(text.to_string());
                texts::ASK_EVENT_AUDIENCE
            }
            DialogState::EventAudience => {
                session.draft.event_audience = Some(text.to_string());
                texts::ASK_EVENT_DETAILS
            }
            other => return Err(Self::wrong_state(other, "event")),
        };

        session.state = session.state.advance().unwrap_or(DialogState::ActionMenu);
        Ok(vec![Reply::text(ask)])
    }

    async fn on_event_details(&self, session: &mut Session, user_id: i64, text: &str) -> Vec<Reply> {
        let event = EventInfo {
            event_name: session.draft.event_name.take().unwrap_or_default(),
            event_date: session.draft.event_date.take().unwrap_or_default(),
            event_location: session.draft.event_location.take().unwrap_or_default(),
            event_audience: session.draft.event_audience.take().unwrap_or_default(),
            event_details: text.to_string(),
        };

        self.save_record(user_id, GenerationKind::EventInfo, &event);

        let profile = self.profile_for(session, user_id);
        let prompt =
            prompts::with_profile_context(&prompts::event_announcement(&event), profile.as_ref());

        session.state = DialogState::ActionMenu;
        self.generated_text_reply(texts::EVENT_ANNOUNCEMENT_HEADER, &prompt).await
    }

    async fn on_post_example(&self, session: &mut Session, user_id: i64, text: &str) -> Vec<Reply> {
        let example = PostExample {
            post_example: text.to_string(),
        };

        self.save_record(user_id, GenerationKind::PostExample, &example);

        let profile = self.profile_for(session, user_id);
        let prompt = prompts::with_profile_context(
            &prompts::post_from_example(&example.post_example),
            profile.as_ref(),
        );

        session.state = DialogState::ActionMenu;
        self.generated_text_reply(texts::EXAMPLE_STYLE_HEADER, &prompt).await
    }

    fn on_image_step(&self, session: &mut Session, text: &str) -> Result<Vec<Reply>> {
        if session.state.accepts_cancel() && text == texts::BTN_CANCEL {
            session.state = DialogState::ActionMenu;
            return Ok(vec![Reply::with_keyboard(texts::CANCEL_IMAGE, keyboards::actions())]);
        }

        let ask = match session.state {
            DialogState::ImageSubject => {
                session.draft.subject = Some(text.to_string());
                texts::ASK_IMAGE_BACKGROUND
            }
            DialogState::ImageBackground => {
                session.draft.background = Some(text.to_string());
                texts::ASK_IMAGE_STYLE
            }
            other => return Err(Self::wrong_state(other, "image")),
        };

        session.state = session.state.advance().unwrap_or(DialogState::ActionMenu);
        Ok(vec![Reply::with_keyboard(ask, keyboards::cancel())])
    }

    async fn on_image_style(&self, session: &mut Session, user_id: i64, text: &str) -> Vec<Reply> {
        if session.state.accepts_cancel() && text == texts::BTN_CANCEL {
            session.state = DialogState::ActionMenu;
            return vec![Reply::with_keyboard(texts::CANCEL_IMAGE, keyboards::actions())];
        }

        let request = ImageRequest {
            subject: session.draft.subject.take().unwrap_or_default(),
            background: session.draft.background.take().unwrap_or_default(),
            style: text.to_string(),
        };

        self.save_record(user_id, GenerationKind::Image, &request);
        session.state = DialogState::ActionMenu;

        let mut replies = vec![Reply::text(texts::IMAGE_IN_PROGRESS)];

        match self.generator.generate_image(&request).await {
            Ok(bytes) => replies.push(Reply::photo(
                bytes,
                GENERATED_PHOTO_NAME,
                Some(texts::IMAGE_CAPTION.to_string()),
                Some(keyboards::actions()),
            )),
            Err(e) => {
                tracing::error!(user_id, error = %e, "image generation failed");
                replies.push(Reply::with_keyboard(texts::IMAGE_FAILED, keyboards::actions()));
            }
        }

        replies
    }

    fn on_plan_step(&self, session: &mut Session, text: &str) -> Result<Vec<Reply>> {
        if session.state.accepts_cancel() && text == texts::BTN_CANCEL {
            session.state = DialogState::ActionMenu;
            return Ok(vec![Reply::with_keyboard(texts::CANCEL_PLAN, keyboards::actions())]);
        }

        let ask = match session.state {
            DialogState::PlanPeriod => {
                session.draft.period = Some(text.to_string());
                texts::ASK_PLAN_THEME
            }
            DialogState::PlanTheme => {
                session.draft.theme = Some(text.to_string());
                texts::ASK_PLAN_GOALS
            }
            other => return Err(Self::wrong_state(other, "content plan")),
        };

        session.state = session.state.advance().unwrap_or(DialogState::ActionMenu);
        Ok(vec![Reply::text(ask)])
    }

    async fn on_plan_goals(&self, session: &mut Session, user_id: i64, text: &str) -> Vec<Reply> {
        if session.state.accepts_cancel() && text == texts::BTN_CANCEL {
            session.state = DialogState::ActionMenu;
            return vec![Reply::with_keyboard(texts::CANCEL_PLAN, keyboards::actions())];
        }

        let request = ContentPlanRequest {
            period: session.draft.period.take().unwrap_or_default(),
            theme: session.draft.theme.take().unwrap_or_default(),
            goals: text.to_string(),
        };

        self.save_record(user_id, GenerationKind::ContentPlan, &request);

        let profile = self.profile_for(session, user_id);
        let prompt =
            prompts::with_profile_context(&prompts::content_plan(&request), profile.as_ref());

        session.state = DialogState::ActionMenu;

        let mut replies = vec![Reply::text(texts::PLAN_IN_PROGRESS)];

        match self.generator.generate_text(&prompt).await {
            Ok(plan) => {
                let parts = split_message(&plan, MAX_MESSAGE_LEN);
                let total = parts.len();

                if total == 1 {
                    replies.push(Reply::text(format!("{}\n\n{}", texts::PLAN_HEADER, plan)));
                } else {
                    for (index, part) in parts.into_iter().enumerate() {
                        if index == 0 {
                            replies.push(Reply::text(format!(
                                "📊 КОНТЕНТ-ПЛАН (часть 1/{}):\n\n{}",
                                total, part
                            )));
                        } else {
                            replies.push(Reply::delayed_text(part, PLAN_PART_DELAY));
                        }
                    }
                }

                replies.push(Reply::with_keyboard(texts::PLAN_TIPS, keyboards::actions()));
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "content plan generation failed");
                replies.push(Reply::with_keyboard(texts::GENERATION_FAILED, keyboards::actions()));
            }
        }

        replies
    }

    async fn on_text_edit(&self, session: &mut Session, user_id: i64, text: &str) -> Vec<Reply> {
        let request = TextEditRequest {
            text: text.to_string(),
        };

        self.save_record(user_id, GenerationKind::TextEdit, &request);

        // Proofreading runs without organization context
        let prompt = prompts::proofread(text);

        session.state = DialogState::ActionMenu;
        self.generated_text_reply(texts::EDIT_RESULT_HEADER, &prompt).await
    }

    /// Run a text generation and wrap the result under the flow header
    async fn generated_text_reply(&self, header: &str, prompt: &str) -> Vec<Reply> {
        match self.generator.generate_text(prompt).await {
            Ok(result) => vec![Reply::with_keyboard(
                format!("{}\n\n{}", header, result),
                keyboards::actions(),
            )],
            Err(e) => {
                tracing::error!(error = %e, "text generation failed");
                vec![Reply::with_keyboard(texts::GENERATION_FAILED, keyboards::actions())]
            }
        }
    }

    /// Profile for prompt context: the session's own, or the persisted one
    fn profile_for(&self, session: &Session, user_id: i64) -> Option<NgoProfile> {
        if let Some(profile) = &session.profile {
            return Some(profile.clone());
        }

        match self.storage.load_profile(user_id) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to load persisted profile");
                None
            }
        }
    }

    /// Generation records are best-effort; a failed write must not block
    /// the generation itself
    fn save_record<T: Serialize>(&self, user_id: i64, kind: GenerationKind, record: &T) {
        if let Err(e) = self.storage.save_record(user_id, kind, record) {
            tracing::warn!(user_id, ?kind, error = %e, "failed to save generation record");
        }
    }

    fn wrong_state(state: DialogState, flow: &str) -> BotError {
        BotError::InvalidTransition {
            state: format!("{:?}", state),
            reason: format!("{} handler invoked outside its flow", flow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct EchoGenerator;

    #[async_trait]
    impl ContentGenerator for EchoGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String> {
            Ok("сгенерированный текст".to_string())
        }

        async fn generate_image(&self, _request: &ImageRequest) -> Result<Vec<u8>> {
            Ok(vec![0xFF, 0xD8])
        }
    }

    fn test_dialog() -> (Dialog, TempDir) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("data"));
        storage.ensure_root().unwrap();
        let dialog = Dialog::new(Arc::new(EchoGenerator), storage, None);
        (dialog, temp)
    }

    #[tokio::test]
    async fn test_unknown_chat_is_ignored() {
        let (dialog, _temp) = test_dialog();
        let replies = dialog.handle(1, 1, "привет").await.unwrap();
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn test_start_greets_with_main_menu() {
        let (dialog, _temp) = test_dialog();
        let replies = dialog.handle(1, 1, "/start").await.unwrap();

        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text_content(), Some(texts::WELCOME));
        assert!(matches!(
            &replies[0],
            Reply::Text { keyboard: Some(_), .. }
        ));
    }

    #[tokio::test]
    async fn test_start_resets_mid_flow() {
        let (dialog, _temp) = test_dialog();

        dialog.handle(1, 1, "/start").await.unwrap();
        dialog.handle(1, 1, texts::BTN_SKIP_PROFILE).await.unwrap();
        dialog.handle(1, 1, texts::BTN_CONTENT_PLAN).await.unwrap();

        // Mid-flow /start drops back to the entry menu
        let replies = dialog.handle(1, 1, "/start").await.unwrap();
        assert_eq!(replies[0].text_content(), Some(texts::WELCOME));

        let replies = dialog.handle(1, 1, "что-то непонятное").await.unwrap();
        assert_eq!(replies[0].text_content(), Some(texts::CHOOSE_OPTION));
    }

    #[tokio::test]
    async fn test_unknown_input_reprompts_menu() {
        let (dialog, _temp) = test_dialog();

        dialog.handle(1, 1, "/start").await.unwrap();
        let replies = dialog.handle(1, 1, "не кнопка").await.unwrap();

        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text_content(), Some(texts::CHOOSE_OPTION));
    }
}
