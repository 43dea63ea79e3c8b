use crate::editor::window::Mode;

macro_rules! make_keymap {
    ($($key:expr, $action:ident),+,) => {
        &[
            $(
                ($key, stringify!($action)),
             )*
        ]
    }
}

/// Default bindings of `mode` as key and action name pairs
pub(crate) fn mappings(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Normal => normal(),
        Mode::Insert => insert(),
        Mode::Replace => replace(),
        Mode::Command | Mode::Search => prompt(),
    }
}

fn normal() -> &'static [(&'static str, &'static str)] {
    #[rustfmt::skip]
    let map = make_keymap!(
        "h",            prev_byte,
        "l",            next_byte,
        "k",            prev_row,
        "j",            next_row,
        "left",         prev_byte,
        "right",        next_byte,
        "up",           prev_row,
        "down",         next_row,
        "w",            next_row_start,
        "b",            prev_row_start,
        "0",            row_start,
        "home",         row_start,
        "$",            row_end,
        "end",          row_end,
        "g",            buffer_start,
        "G",            buffer_end,
        "ctrl+f",       page_down,
        "ctrl+b",       page_up,
        "pagedown",     page_down,
        "pageup",       page_up,

        "i",            insert_mode,
        "a",            append_mode,
        "R",            replace_mode,
        "x",            delete_byte,
        "delete",       delete_byte,
        "u",            undo,
        "ctrl+r",       redo,

        ":",            command_prompt,
        "/",            search_forward,
        "?",            search_backward,
        "n",            next_match,
        "N",            prev_match,

        "ctrl+s",       save,
        "ctrl+q",       quit,
    );

    map
}

fn insert() -> &'static [(&'static str, &'static str)] {
    #[rustfmt::skip]
    let map = make_keymap!(
        "esc",          normal_mode,
        "left",         prev_byte,
        "right",        next_byte,
        "up",           prev_row,
        "down",         next_row,
        "home",         row_start,
        "end",          row_end,
        "pagedown",     page_down,
        "pageup",       page_up,
        "backspace",    delete_byte_before,
        "delete",       delete_byte,
        "ctrl+s",       save,
    );

    map
}

fn replace() -> &'static [(&'static str, &'static str)] {
    #[rustfmt::skip]
    let map = make_keymap!(
        "esc",          normal_mode,
        "left",         prev_byte,
        "right",        next_byte,
        "up",           prev_row,
        "down",         next_row,
        "home",         row_start,
        "end",          row_end,
        "pagedown",     page_down,
        "pageup",       page_up,
        "backspace",    prev_byte,
        "ctrl+s",       save,
    );

    map
}

fn prompt() -> &'static [(&'static str, &'static str)] {
    #[rustfmt::skip]
    let map = make_keymap!(
        "esc",          prompt_close,
        "ctrl+c",       prompt_close,
        "enter",        prompt_confirm,
        "backspace",    prompt_remove_char_before_cursor,
        "left",         prompt_prev_char,
        "right",        prompt_next_char,
    );

    map
}
