use crate::error::{Result, TimerError};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Преобразование имён клавиш из строки сочетания в evdev коды.
///
/// Первое имя в каждой группе считается каноническим, остальные — синонимы,
/// которые пользователи привыкли писать в сочетаниях (`esc`, `win`, `return`...).
pub struct KeyNames;

const KEY_TABLE: &[(u16, &[&str])] = &[
    // Модификаторы
    (29, &["ctrl", "control", "ctrlleft", "lctrl"]),         // KEY_LEFTCTRL
    (97, &["ctrlright", "rctrl"]),                           // KEY_RIGHTCTRL
    (42, &["shift", "shiftleft", "lshift"]),                 // KEY_LEFTSHIFT
    (54, &["shiftright", "rshift"]),                         // KEY_RIGHTSHIFT
    (56, &["alt", "option", "altleft", "lalt"]),             // KEY_LEFTALT
    (100, &["altright", "ralt", "altgr"]),                   // KEY_RIGHTALT
    (125, &["super", "win", "winleft", "cmd", "command", "meta"]), // KEY_LEFTMETA
    (126, &["winright", "rsuper"]),                          // KEY_RIGHTMETA
    // Специальные клавиши
    (1, &["esc", "escape"]),
    (28, &["enter", "return"]),
    (57, &["space", " "]),
    (14, &["backspace"]),
    (15, &["tab"]),
    (58, &["capslock"]),
    (69, &["numlock"]),
    (70, &["scrolllock"]),
    (99, &["printscreen", "prtsc", "prntscrn", "sysrq"]),
    (119, &["pause"]),
    (139, &["menu", "apps"]),
    // Навигация/редакция
    (110, &["insert", "ins"]),
    (111, &["delete", "del"]),
    (102, &["home"]),
    (107, &["end"]),
    (104, &["pageup", "pgup"]),
    (109, &["pagedown", "pgdn"]),
    (103, &["up"]),
    (108, &["down"]),
    (105, &["left"]),
    (106, &["right"]),
    // Знаки пунктуации
    (12, &["minus", "-"]),
    (13, &["equal", "="]),
    (26, &["leftbrace", "["]),
    (27, &["rightbrace", "]"]),
    (43, &["backslash", "\\"]),
    (39, &["semicolon", ";"]),
    (40, &["apostrophe", "'"]),
    (41, &["grave", "`"]),
    (51, &["comma", ","]),
    (52, &["dot", "period", "."]),
    (53, &["slash", "/"]),
    // Numpad
    (82, &["kp0", "num0"]),
    (79, &["kp1", "num1"]),
    (80, &["kp2", "num2"]),
    (81, &["kp3", "num3"]),
    (75, &["kp4", "num4"]),
    (76, &["kp5", "num5"]),
    (77, &["kp6", "num6"]),
    (71, &["kp7", "num7"]),
    (72, &["kp8", "num8"]),
    (73, &["kp9", "num9"]),
    (83, &["kpdecimal", "decimal"]),
    (98, &["kpdivide", "divide"]),
    (55, &["kpmultiply", "multiply"]),
    (78, &["kpadd", "add"]),
    (74, &["kpsubtract", "subtract"]),
    (96, &["kpenter"]),
    // Мультимедиа
    (113, &["volumemute", "mute"]),
    (114, &["volumedown"]),
    (115, &["volumeup"]),
    (164, &["playpause"]),
    (163, &["nexttrack"]),
    (165, &["prevtrack"]),
];

const LETTERS: [(char, u16); 26] = [
    ('a', 30), ('b', 48), ('c', 46), ('d', 32), ('e', 18), ('f', 33), ('g', 34),
    ('h', 35), ('i', 23), ('j', 36), ('k', 37), ('l', 38), ('m', 50), ('n', 49),
    ('o', 24), ('p', 25), ('q', 16), ('r', 19), ('s', 31), ('t', 20), ('u', 22),
    ('v', 47), ('w', 17), ('x', 45), ('y', 21), ('z', 44),
];

// F1..F10 идут подряд, F11/F12 и F13..F24 лежат в других диапазонах
const FUNCTION_KEYS: [u16; 24] = [
    59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 87, 88,
    183, 184, 185, 186, 187, 188, 189, 190, 191, 192, 193, 194,
];

static NAME_TO_CODE: Lazy<HashMap<String, u16>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for (ch, code) in LETTERS {
        map.insert(ch.to_string(), code);
    }

    // Цифровые клавиши (верхний ряд): 1..9 => 2..10, 0 => 11
    for digit in 1..=9u16 {
        map.insert(digit.to_string(), digit + 1);
    }
    map.insert("0".to_string(), 11);

    for (i, code) in FUNCTION_KEYS.iter().enumerate() {
        map.insert(format!("f{}", i + 1), *code);
    }

    for (code, names) in KEY_TABLE {
        for name in *names {
            map.insert((*name).to_string(), *code);
        }
    }

    map
});

static CODE_TO_NAME: Lazy<HashMap<u16, String>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (ch, code) in LETTERS {
        map.insert(code, ch.to_string());
    }
    for digit in 1..=9u16 {
        map.insert(digit + 1, digit.to_string());
    }
    map.insert(11, "0".to_string());
    for (i, code) in FUNCTION_KEYS.iter().enumerate() {
        map.insert(*code, format!("f{}", i + 1));
    }
    for (code, names) in KEY_TABLE {
        map.insert(*code, names[0].to_string());
    }
    map
});

impl KeyNames {
    /// Получить evdev код клавиши по её имени (регистр не важен)
    pub fn translate(key_name: &str) -> Result<u16> {
        let trimmed = key_name.trim();
        // " " допустим как имя пробела, поэтому пустую строку проверяем до trim
        let lookup = if trimmed.is_empty() && !key_name.is_empty() {
            " ".to_string()
        } else {
            trimmed.to_lowercase()
        };

        NAME_TO_CODE
            .get(lookup.as_str())
            .copied()
            .ok_or_else(|| TimerError::InvalidKey(key_name.to_string()))
    }

    /// Каноническое имя клавиши по evdev коду
    pub fn reverse_translate(keycode: u16) -> Option<&'static str> {
        CODE_TO_NAME.get(&keycode).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_key_mapping() {
        assert_eq!(KeyNames::translate("a").unwrap(), 30);
        assert_eq!(KeyNames::translate("T").unwrap(), 20);
        assert_eq!(KeyNames::translate("0").unwrap(), 11);
        assert_eq!(KeyNames::translate("5").unwrap(), 6);
    }

    #[test]
    fn test_aliases_share_codes() {
        assert_eq!(KeyNames::translate("esc").unwrap(), KeyNames::translate("Escape").unwrap());
        assert_eq!(KeyNames::translate("win").unwrap(), KeyNames::translate("super").unwrap());
        assert_eq!(KeyNames::translate("return").unwrap(), 28);
        assert_eq!(KeyNames::translate("pgdn").unwrap(), 109);
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(KeyNames::translate("f1").unwrap(), 59);
        assert_eq!(KeyNames::translate("F12").unwrap(), 88);
        assert_eq!(KeyNames::translate("f13").unwrap(), 183);
        assert_eq!(KeyNames::reverse_translate(88), Some("f12"));
    }

    #[test]
    fn test_reverse_uses_canonical_name() {
        assert_eq!(KeyNames::reverse_translate(1), Some("esc"));
        assert_eq!(KeyNames::reverse_translate(29), Some("ctrl"));
        assert_eq!(KeyNames::reverse_translate(30), Some("a"));
        assert_eq!(KeyNames::reverse_translate(0), None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = KeyNames::translate("hyper").unwrap_err();
        assert!(matches!(err, TimerError::InvalidKey(name) if name == "hyper"));
    }
}
