//! User-facing strings
//!
//! Button labels are matched byte-for-byte against incoming messages, so
//! every label and message template lives here.

// Button labels

pub const BTN_FILL_PROFILE: &str = "Заполнить данные об НКО";
pub const BTN_SKIP_PROFILE: &str = "Продолжить без данных";

pub const BTN_GENERATE_TEXT: &str = "Генерация текста";
pub const BTN_MAKE_IMAGE: &str = "Сделать картинку";
pub const BTN_CONTENT_PLAN: &str = "Контент-план";
pub const BTN_TEXT_EDITOR: &str = "Редактор текста";
pub const BTN_BACK: &str = "Назад";

pub const BTN_POST_BY_IDEA: &str = "Генерация текста для поста по вашей идее";
pub const BTN_POST_FOR_EVENT: &str =
    "Генерация текста для поста, информирующий о предстоящем мероприятии";
pub const BTN_POST_BY_EXAMPLE: &str = "Генерация текста на примере другого поста";
pub const BTN_BACK_TO_MENU: &str = "Назад в меню";

pub const BTN_SKIP: &str = "Пропустить";
pub const BTN_CANCEL: &str = "Отмена";

// Greeting and menus

pub const WELCOME: &str = "⭐️ Привет!

Я бот, который помогает генерировать тексты постов, создавать изображения и идеи контент-плана 🤖

Сэкономлю время и помогу рассказать миру о вашем важном деле ярко и качественно 💪";

pub const CHOOSE_OPTION: &str = "Пожалуйста, выберите один из предложенных вариантов:";
pub const CHOOSE_FROM_MENU: &str = "Выберите вариант из меню:";
pub const CHOOSE_TEXT_TYPE: &str = "📝 Выберите тип генерации текста:";
pub const CONTINUE_WITHOUT_DATA: &str = "Вы выбрали: Продолжить без данных";
pub const GOTO_ACTIONS: &str = "Переходим к основным функциям:";
pub const BACK_TO_MAIN: &str = "Возвращаемся в главное меню:";
pub const BACK_TO_ACTIONS: &str = "Возвращаемся к основным функциям:";

// Profile flow

pub const PROFILE_INTRO: &str = "Я генерирую контент, подстраиваясь под цели вашей организации.
Позвольте узнать про вашу НКО, чтобы помочь вам достичь результата как можно скорее!

1️⃣ Напишите название вашей организации

❗️Если вы не хотите сообщать данные об НКО, ничего страшного! Просто нажмите кнопку \"Пропустить\"";

pub const PROFILE_NAME_SKIPPED: &str = "Название организации пропущено";
pub const PROFILE_ASK_DESCRIPTION: &str = "2️⃣ Опишите вашу организацию в 2-3 предложениях.
Это поможет мне лучше понять ваши цели и аудиторию!";
pub const PROFILE_DESCRIPTION_SKIPPED: &str = "Описание организации пропущено";
pub const PROFILE_DESCRIPTION_SAVED: &str = "✅ Описание сохранено";
pub const PROFILE_ASK_ACTIVITY: &str = "3️⃣ Напишите форму вашей деятельности
Например, медицина, защита окружающей среды, социальная защита и т. д.";
pub const PROFILE_ACTIVITY_SKIPPED: &str = "Форма деятельности пропущена";
pub const PROFILE_ACTIVITY_SAVED: &str = "✅ Форма деятельности сохранена";

pub const PROFILE_SAVED: &str = "🎉 Данные об НКО успешно сохранены!
Теперь я могу генерировать контент, учитывая специфику вашей организации.";
pub const PROFILE_SAVE_FAILED: &str = "⚠️ Данные собраны, но произошла ошибка при сохранении файла.
Переходим к основным функциям:";

// Post from an idea

pub const ASK_POST_TOPIC: &str = "Напишите тему поста 📇:";
pub const ASK_POST_ASPECT: &str = "Опишите аспект темы, который хотите раскрыть 🖋️:";
pub const ASK_POST_RELEVANCE: &str = "Почему эта тема актуальна? 🤔";
pub const CANCEL_TEXT_GEN: &str = "Отменяем генерацию текста";
pub const GENERATED_TEXT_HEADER: &str = "📝 Сгенерированный текст:";

// Event announcement

pub const ASK_EVENT_NAME: &str = "Какое мероприятие вы организуете? 🔨";
pub const ASK_EVENT_DATE: &str = "Когда состоится мероприятие? (дата и время) 📅";
pub const ASK_EVENT_LOCATION: &str = "Где будет проходить мероприятие?";
pub const ASK_EVENT_AUDIENCE: &str = "Для кого организовано мероприятие? 👥";
pub const ASK_EVENT_DETAILS: &str = "Дополнительные детали мероприятия ➕:";
pub const EVENT_ANNOUNCEMENT_HEADER: &str = "📅 Анонс мероприятия:";

// Post in the style of an example

pub const ASK_POST_EXAMPLE: &str = "Отправьте текст поста-примера 💭:";
pub const EXAMPLE_STYLE_HEADER: &str = "📝 Текст в стиле примера:";

// Image generation

pub const ASK_IMAGE_SUBJECT: &str = "Отлично!

Опишите, кого или что вы хотите видеть на картинке?";
pub const ASK_IMAGE_BACKGROUND: &str = "Теперь опишите фон или окружение для изображения:";
pub const ASK_IMAGE_STYLE: &str =
    "Какой стиль изображения предпочитаете? (например: реализм, мультяшный, минимализм)";
pub const CANCEL_IMAGE: &str = "Отменяем генерацию изображения";
pub const IMAGE_IN_PROGRESS: &str = "🔄 Генерирую изображение... Это может занять несколько секунд ⏳";
pub const IMAGE_CAPTION: &str = "🎨 Ваше сгенерированное изображение!";
pub const IMAGE_FAILED: &str =
    "❌ Не удалось сгенерировать изображение. Попробуйте позже или измените описание.";

// Content plan

pub const ASK_PLAN_PERIOD: &str =
    "На какой период нужен контент-план? (например: на неделю, на месяц, на квартал)";
pub const ASK_PLAN_THEME: &str = "✅ Отлично! Какая основная тема контент-плана?";
pub const ASK_PLAN_GOALS: &str = "✅ Отлично! Какие цели вы хотите достичь с помощью контента?";
pub const CANCEL_PLAN: &str = "Отменяем создание контент-плана";
pub const PLAN_IN_PROGRESS: &str = "🔄 Создаю контент-план... Это займет несколько секунд ⏳";
pub const PLAN_HEADER: &str = "📊 ВАШ КОНТЕНТ-ПЛАН:";

pub const PLAN_TIPS: &str = "🎯 Контент-план создан! Теперь у вас есть четкий план публикаций.

💡 Советы по использованию:
• Адаптируйте предложенные идеи под вашу аудиторию
• Используйте разные форматы контента
• Отслеживайте engagement для оптимизации

Что хотите сделать дальше?";

// Proofreading

pub const ASK_TEXT_TO_EDIT: &str = "Отправьте текст, который нужно проверить";
pub const EDIT_RESULT_HEADER: &str = "🔍 Результат проверки:";

// Failure notices

pub const GENERATION_FAILED: &str = "❌ Ошибка при генерации текста. Попробуйте позже.";
