//! Reply keyboards shown under the input field

use crate::dialog::texts;
use crate::telegram::types::ReplyKeyboardMarkup;

/// Entry menu: fill in the profile or continue without it
pub fn main_menu() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::from_rows(&[&[texts::BTN_FILL_PROFILE, texts::BTN_SKIP_PROFILE]])
}

/// Main action menu
pub fn actions() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::from_rows(&[
        &[texts::BTN_GENERATE_TEXT, texts::BTN_MAKE_IMAGE],
        &[texts::BTN_CONTENT_PLAN, texts::BTN_TEXT_EDITOR],
        &[texts::BTN_BACK],
    ])
}

/// Text generation sub-menu, one flow per row
pub fn text_types() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::from_rows(&[
        &[texts::BTN_POST_BY_IDEA],
        &[texts::BTN_POST_FOR_EVENT],
        &[texts::BTN_POST_BY_EXAMPLE],
        &[texts::BTN_BACK_TO_MENU],
    ])
}

/// Single skip button for profile steps
pub fn skip() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::from_rows(&[&[texts::BTN_SKIP]])
}

/// Single cancel button for flow steps
pub fn cancel() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup::from_rows(&[&[texts::BTN_CANCEL]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_menu_layout() {
        let keyboard = main_menu();
        assert_eq!(keyboard.keyboard.len(), 1);
        assert_eq!(keyboard.keyboard[0].len(), 2);
        assert_eq!(keyboard.keyboard[0][0].text, texts::BTN_FILL_PROFILE);
    }

    #[test]
    fn test_actions_layout() {
        let keyboard = actions();
        assert_eq!(keyboard.keyboard.len(), 3);
        assert_eq!(keyboard.keyboard[2], vec![crate::telegram::types::KeyboardButton {
            text: texts::BTN_BACK.to_string()
        }]);
    }

    #[test]
    fn test_text_types_one_flow_per_row() {
        let keyboard = text_types();
        assert_eq!(keyboard.keyboard.len(), 4);
        for row in &keyboard.keyboard {
            assert_eq!(row.len(), 1);
        }
    }

    #[test]
    fn test_single_button_keyboards() {
        assert_eq!(skip().keyboard[0][0].text, texts::BTN_SKIP);
        assert_eq!(cancel().keyboard[0][0].text, texts::BTN_CANCEL);
    }
}
