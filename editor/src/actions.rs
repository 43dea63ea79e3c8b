/// Define an editor action: a function run against the editor and a constant
/// of the same name that describes it. The constant is what gets bound to
/// keys and looked up by name.
macro_rules! action {
    ($desc:literal, fn $name:ident($editor:ident) $body:block) => {
        #[allow(non_upper_case_globals)]
        pub(crate) const $name: $crate::actions::Action = $crate::actions::Action::new(
            stringify!($name),
            $desc,
            {
                fn action_impl($editor: &mut $crate::editor::Editor) $body
                action_impl
            },
        );
    };
}

pub(crate) mod command;
pub(crate) mod editor;
pub(crate) mod movement;
pub(crate) mod prompt;
pub(crate) mod search;
pub(crate) mod text;
pub(crate) mod window;

use std::fmt;

use crate::editor::Editor;

#[derive(Clone, Copy)]
pub(crate) struct Action {
    name: &'static str,
    desc: &'static str,
    fun: fn(&mut Editor),
}

impl Action {
    pub const fn new(name: &'static str, desc: &'static str, fun: fn(&mut Editor)) -> Action {
        Action { name, desc, fun }
    }

    pub fn execute(&self, editor: &mut Editor) {
        (self.fun)(editor)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.desc
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub(crate) fn find_by_name(name: &str) -> Option<Action> {
    ACTIONS.iter().find(|action| action.name() == name).copied()
}

#[rustfmt::skip]
pub(crate) const ACTIONS: &[Action] = &[
    movement::next_byte,
    movement::prev_byte,
    movement::next_row,
    movement::prev_row,
    movement::next_row_start,
    movement::prev_row_start,
    movement::row_start,
    movement::row_end,
    movement::buffer_start,
    movement::buffer_end,
    movement::page_down,
    movement::page_up,

    window::normal_mode,
    window::insert_mode,
    window::append_mode,
    window::replace_mode,

    text::delete_byte,
    text::delete_byte_before,
    text::undo,
    text::redo,
    text::save,

    prompt::command_prompt,
    prompt::prompt_confirm,
    prompt::prompt_close,
    prompt::prompt_remove_char_before_cursor,
    prompt::prompt_next_char,
    prompt::prompt_prev_char,

    search::search_forward,
    search::search_backward,
    search::next_match,
    search::prev_match,

    editor::quit,
    editor::force_quit,
];
