use std::sync::Arc;

use hexe_buffer::{Searcher, SearcherRev};

use crate::{
    common::hex,
    editor::{
        window::{LastSearch, Mode},
        Editor,
    },
    error::EditorError,
};

action!("Search: forward", fn search_forward(editor) {
    open_search(editor, false);
});

action!("Search: backward", fn search_backward(editor) {
    open_search(editor, true);
});

action!("Search: goto next match", fn next_match(editor) {
    let result = goto_match(editor, false);
    editor.report(result);
});

action!("Search: goto previous match", fn prev_match(editor) {
    let result = goto_match(editor, true);
    editor.report(result);
});

fn open_search(editor: &mut Editor, backward: bool) {
    let message = if backward { "?" } else { "/" };
    editor.open_prompt(
        Mode::Search,
        message,
        Arc::new(move |editor: &mut Editor, input: &str| {
            let result = hex::parse_pattern(input).and_then(|pattern| {
                editor.window_mut().last_search = Some(LastSearch { pattern, backward });
                goto_match(editor, false)
            });
            editor.report(result);
        }),
    );
}

/// Move the cursor to the next match of the last search, wrapping around the
/// buffer. `reverse` searches in the opposite direction of the last search.
fn goto_match(editor: &mut Editor, reverse: bool) -> Result<(), EditorError> {
    let win = editor.window_mut();
    let search = win
        .last_search
        .clone()
        .ok_or_else(|| EditorError::InvalidArgument("no previous search".into()))?;
    let backward = search.backward != reverse;
    let cursor = win.cursor();

    let (found, wrapped) = {
        let buf = win.buffer();
        if backward {
            let searcher = SearcherRev::new(&search.pattern);
            match searcher.find_prev(&buf, cursor)? {
                Some(mat) => (Some(mat), false),
                None => (searcher.find_prev(&buf, buf.len())?, true),
            }
        } else {
            let searcher = Searcher::new(&search.pattern);
            match searcher.find_next(&buf, cursor + 1)? {
                Some(mat) => (Some(mat), false),
                None => (searcher.find_next(&buf, 0)?, true),
            }
        }
    };

    match found {
        Some(mat) => {
            log::debug!("Match at {:?}", mat);
            win.goto(mat.start);
            if wrapped {
                let end = if backward { "bottom" } else { "top" };
                win.info(format!("Search wrapped to {}", end));
            }
        }
        None => win.error(format!("Pattern not found: {}", describe(&search.pattern))),
    }

    Ok(())
}

fn describe(pattern: &[u8]) -> String {
    pattern
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
