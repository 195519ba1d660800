// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Splitting of action lists into top-level tokens.

use crate::errors::SyntaxError;

/// Split `input` on the commas which are not enclosed in parentheses.
///
/// The returned tokens borrow from `input` and are exactly the text between top-level commas:
/// no trimming, no unescaping.  A trailing empty token is dropped (`"drop,"` yields `["drop"]`)
/// but empty tokens between commas are kept for the caller to reject.  An empty input yields
/// no tokens.
///
/// ```
/// # use flowctl_actions::tokenize;
/// let tokens = tokenize("strip_vlan,ct(commit,exec(set_field:1->ct_mark)),output:1").unwrap();
/// assert_eq!(tokens, ["strip_vlan", "ct(commit,exec(set_field:1->ct_mark))", "output:1"]);
/// ```
///
/// # Errors
///
/// Returns [`SyntaxError::UnmatchedClose`] on a `)` without a matching `(`, and
/// [`SyntaxError::UnclosedOpen`] if the input ends inside parentheses.
pub fn tokenize(input: &str) -> Result<Vec<&str>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (offset, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SyntaxError::UnmatchedClose {
                        input: input.to_string(),
                        offset,
                    })?;
            }
            ',' if depth == 0 => {
                tokens.push(&input[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(SyntaxError::UnclosedOpen {
            input: input.to_string(),
            depth,
        });
    }
    if start < input.len() {
        tokens.push(&input[start..]);
    }
    Ok(tokens)
}
