//! Prompt templates for the generation flows
//!
//! The templates are the bot's editorial voice and are kept verbatim; the
//! profile context block is appended only when the organization filled in
//! at least one profile field.

use crate::types::{ContentPlanRequest, EventInfo, ImageRequest, NgoProfile, PostIdea};

/// Persona preamble shared by the post-generation templates
const COPYWRITER_PERSONA: &str = "\
ты имеешь огромный опыт в создании:
мероприятий,
маркетинге,
SMM,
психологии человека.

Ты работал в этой сфере всю жизнь и прошел все этапы работы и адаптации.
На данный момент ты профессиональный помощник по написанию анонсов мероприятий для некомерческих организаций.
Каждая твоя фраза это точное, интригующее, завлекающее предложение, которое было основано на данных
Пиши ясно и емко, без ошибок.";

/// Extended persona used where the model also analyses the inputs
const ANALYST_PERSONA: &str = "\
ты имеешь огромный опыт в создании:
мероприятий,
маркетинге,
SMM,
психологии человека.

тебя нанимают тысячи компаний, нацеленные на добрые дела.

Ты работал в этой сфере всю жизнь и прошел все этапы работы и адаптации.
На данный момент ты профессиональный помощник по написанию анонсов мероприятий для некомерческих организаций.
Каждая твоя фраза это точное, интригующее, завлекающее предложение, которое было основано на данных
Пиши ясно и емко, без ошибок.

Анализируй и думай над каждым вводным данным, после на основе анализа выдавай анонс.";

/// Post generated from the user's own idea
pub fn post_from_idea(idea: &PostIdea) -> String {
    format!(
        "{persona}\n\n\
         Сгенерируй текст для поста на тему \"{topic}\".\n\
         Аспект: {aspect}. Актуальность: {relevance}.\n\
         Сделай текст живым, engaging, с призывом к действию и эмодзи.",
        persona = COPYWRITER_PERSONA,
        topic = idea.topic,
        aspect = idea.aspect,
        relevance = idea.relevance,
    )
}

/// Announcement of an upcoming event
pub fn event_announcement(event: &EventInfo) -> String {
    format!(
        "{persona}\n\n\
         Сгенерируй анонс мероприятия для соцсетей:\n\
         - Название: {name}\n\
         - Дата: {date}\n\
         - Место: {location}\n\
         - Аудитория: {audience}\n\
         - Детали: {details}\n\
         Сделай текст привлекательным и информативным с призывом к действию.",
        persona = ANALYST_PERSONA,
        name = event.event_name,
        date = event.event_date,
        location = event.event_location,
        audience = event.event_audience,
        details = event.event_details,
    )
}

/// New post in the style of an example post
pub fn post_from_example(example: &str) -> String {
    format!(
        "{persona} Ты гений анализа и креатива.\n\n\
         Создай новый пост в стиле примера, но на тему деятельности НКО:\n\
         {example}",
        persona = ANALYST_PERSONA,
        example = example,
    )
}

/// Weekday-by-weekday content plan
pub fn content_plan(request: &ContentPlanRequest) -> String {
    format!(
        "Ты - эксперт по контент-стратегии для некоммерческих организаций.\n\
         Разработай профессиональный контент-план для социальных сетей.\n\n\
         ДАННЫЕ ДЛЯ ПЛАНИРОВАНИЯ:\n\
         📅 Период: {period}\n\
         🎯 Тематика: {theme}\n\
         🎯 Цели: {goals}\n\n\
         СТРУКТУРА КОНТЕНТ-ПЛАНА:\n\
         1. ОБЩИЙ ОБЗОР ПЕРИОДА\n\
         2. ДЛЯ КАЖДОГО ЭЛЕМЕНТА УКАЖИ:\n\
            - Тема поста\n\
            - Формат контента\n\
            - Ключевое сообщение\n\
            - Призыв к действию (CTA)\n\
            - Рекомендуемые хэштеги\n\n\
         ТРЕБОВАНИЯ:\n\
         • Соответствуй тематике НКО\n\
         • Чередуй образовательный, вовлекающий и призывной контент\n\
         • Учитывай реалистичность выполнения\n\
         • Включи 1-2 дня для пользовательского контента\n\n\
         ФОРМАТ ОТВЕТА:\n\
         понедельник: ....\n\
         вторник: ....\n\
         среда: ....\n\
         четверг: ...\n\
         пятница: ...\n\
         суббота: ...\n\
         воскресенье: ...\n\n\
         используй простой текст столбиком, чтобы было сразу наглядно, понятно и ясно. \
         Добавь лаконичные эмодзи, которые дополняют контент-план",
        period = request.period,
        theme = request.theme,
        goals = request.goals,
    )
}

/// Grammar, syntax and punctuation check
pub fn proofread(text: &str) -> String {
    format!(
        "Ты гений драматургии и лингвистики. Ты проверяешь каждое слово и значение, \
         а также анализируешь на корректность сочиненные связи.\n\
         Проверь текст на грамматические, синтаксические и пунктуационные ошибки:\n\
         {}",
        text
    )
}

/// Free-form request that the image function interprets
pub fn image_prompt(request: &ImageRequest) -> String {
    format!(
        "Сгенерируй изображение. Объект: {}. Фон: {}. Стиль: {}",
        request.subject, request.background, request.style
    )
}

/// Append the organization context block when the profile has content.
///
/// With no profile (or a fully skipped one) the base prompt is returned
/// untouched.
pub fn with_profile_context(base: &str, profile: Option<&NgoProfile>) -> String {
    let profile = match profile {
        Some(p) if !p.is_empty() => p,
        _ => return base.to_string(),
    };

    let mut context = String::new();
    if let Some(name) = &profile.org_name {
        context.push_str(&format!("Организация: {}. ", name));
    }
    if let Some(description) = &profile.org_description {
        context.push_str(&format!("Описание: {}. ", description));
    }
    if let Some(activity) = &profile.org_activity {
        context.push_str(&format!("Деятельность: {}. ", activity));
    }

    format!(
        "{}\n\nКонтекст для генерации: {}\n\nУчти эту информацию при создании текста.",
        base, context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_idea_carries_inputs() {
        let prompt = post_from_idea(&PostIdea {
            topic: "сбор макулатуры".to_string(),
            aspect: "экология города".to_string(),
            relevance: "весенний субботник".to_string(),
        });

        assert!(prompt.contains("сбор макулатуры"));
        assert!(prompt.contains("экология города"));
        assert!(prompt.contains("весенний субботник"));
    }

    #[test]
    fn test_event_announcement_lists_fields() {
        let prompt = event_announcement(&EventInfo {
            event_name: "День донора".to_string(),
            event_date: "12 мая, 10:00".to_string(),
            event_location: "ДК Октябрь".to_string(),
            event_audience: "волонтеры".to_string(),
            event_details: "нужна регистрация".to_string(),
        });

        assert!(prompt.contains("- Название: День донора"));
        assert!(prompt.contains("- Дата: 12 мая, 10:00"));
        assert!(prompt.contains("- Детали: нужна регистрация"));
    }

    #[test]
    fn test_content_plan_weekday_skeleton() {
        let prompt = content_plan(&ContentPlanRequest {
            period: "на неделю".to_string(),
            theme: "помощь приютам".to_string(),
            goals: "новые волонтеры".to_string(),
        });

        assert!(prompt.contains("📅 Период: на неделю"));
        assert!(prompt.contains("понедельник:"));
        assert!(prompt.contains("воскресенье:"));
    }

    #[test]
    fn test_image_prompt_shape() {
        let prompt = image_prompt(&ImageRequest {
            subject: "котенок".to_string(),
            background: "осенний парк".to_string(),
            style: "акварель".to_string(),
        });

        assert_eq!(
            prompt,
            "Сгенерируй изображение. Объект: котенок. Фон: осенний парк. Стиль: акварель"
        );
    }

    #[test]
    fn test_profile_context_absent() {
        assert_eq!(with_profile_context("база", None), "база");

        let empty = NgoProfile::default();
        assert_eq!(with_profile_context("база", Some(&empty)), "база");
    }

    #[test]
    fn test_profile_context_partial() {
        let profile = NgoProfile {
            org_name: Some("Добрые руки".to_string()),
            org_description: None,
            org_activity: Some("социальная защита".to_string()),
        };

        let prompt = with_profile_context("база", Some(&profile));
        assert!(prompt.starts_with("база"));
        assert!(prompt.contains("Организация: Добрые руки."));
        assert!(!prompt.contains("Описание:"));
        assert!(prompt.contains("Деятельность: социальная защита."));
        assert!(prompt.contains("Учти эту информацию"));
    }
}
