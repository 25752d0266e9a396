//! The command table and sequence processor.
//!
//! The table is plain configuration data built at startup: one entry per
//! command with its aliases, usage line, examples, and arity bounds. Prompt
//! strings are mapped to [`FlexCommand`] variants here, at the boundary;
//! everything past this point is typed.

use wgram_core::Windowgram;
use wgram_flex::{FlexCommand, apply, split_size_pair};

use crate::error::CliError;

/// One command's prompt surface.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub examples: &'static [&'static str],
    pub min_args: usize,
    /// `None` means the command takes any number of trailing arguments.
    pub max_args: Option<usize>,
}

/// Every command the console accepts.
#[must_use]
pub fn command_table() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "scale",
            aliases: &["size"],
            usage: "scale <size> [size]",
            examples: &["scale 25", "scale 500%", "scale 2x", "scale 64:36", "scale 25 15"],
            min_args: 1,
            max_args: Some(2),
        },
        CommandSpec {
            name: "add",
            aliases: &["append", "app"],
            usage: "add <edge> <size> [pane]",
            examples: &["add right 50% A", "add b 3", "add l .5x"],
            min_args: 2,
            max_args: Some(3),
        },
        CommandSpec {
            name: "break",
            aliases: &["grid", "panes"],
            usage: "break <pane> <cols>x<rows> [panes]",
            examples: &["break 1 3x3", "break 0 3x1 x", "break z 3x2 IVXLCD"],
            min_args: 2,
            max_args: Some(3),
        },
        CommandSpec {
            name: "join",
            aliases: &["group", "merge", "glue"],
            usage: "join <group>[.<pane>]...",
            examples: &["join abcd efgh", "join abcd.x efgh.y"],
            min_args: 1,
            max_args: None,
        },
        CommandSpec {
            name: "split",
            aliases: &[],
            usage: "split <pane> <axis|edge> [size] [panes]",
            examples: &["split 1 bottom 3", "split 1 vertical -3", "split 0 left 25% LR"],
            min_args: 2,
            max_args: Some(4),
        },
        CommandSpec {
            name: "rename",
            aliases: &[],
            usage: "rename <from> <to>...",
            examples: &["rename Ff Tt", "rename F T f t"],
            min_args: 2,
            max_args: None,
        },
        CommandSpec {
            name: "swap",
            aliases: &[],
            usage: "swap <from> <to>...",
            examples: &["swap A B", "swap Aa Bb 1 2"],
            min_args: 2,
            max_args: None,
        },
        CommandSpec {
            name: "mirror",
            aliases: &[],
            usage: "mirror",
            examples: &["mirror"],
            min_args: 0,
            max_args: Some(0),
        },
        CommandSpec {
            name: "flip",
            aliases: &[],
            usage: "flip",
            examples: &["flip"],
            min_args: 0,
            max_args: Some(0),
        },
    ]
}

fn find_command(name: &str) -> Option<CommandSpec> {
    command_table()
        .into_iter()
        .find(|spec| spec.name == name || spec.aliases.contains(&name))
}

fn build_command(name: &str, args: &[String]) -> FlexCommand {
    match name {
        "scale" => {
            if args.len() == 1 {
                let (width, height) = split_size_pair(&args[0]);
                FlexCommand::Scale { width, height }
            } else {
                FlexCommand::Scale { width: args[0].clone(), height: args[1].clone() }
            }
        }
        "add" => FlexCommand::Add {
            edge: args[0].clone(),
            size: args[1].clone(),
            pane: args.get(2).cloned(),
        },
        "break" => FlexCommand::Break {
            pane: args[0].clone(),
            grid: args[1].clone(),
            new_panes: args.get(2).cloned(),
        },
        "join" => FlexCommand::Join { groups: args.to_vec() },
        "split" => FlexCommand::Split {
            pane: args[0].clone(),
            how: args[1].clone(),
            size: args.get(2).cloned(),
            new_panes: args.get(3).cloned(),
        },
        "rename" => FlexCommand::Rename { pairs: args.to_vec() },
        "swap" => FlexCommand::Swap { pairs: args.to_vec() },
        "mirror" => FlexCommand::Mirror,
        _ => FlexCommand::Flip,
    }
}

/// Run a `;`-separated command sequence against a windowgram.
///
/// Processing halts on the first command that produces any notice, warning
/// or error, and nothing after it runs; the notices travel in the error.
pub fn run_sequence(start: &Windowgram, line: &str) -> Result<Windowgram, CliError> {
    let mut current = start.clone();
    for piece in line.split(';') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let mut tokens = piece.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();
        let Some(spec) = find_command(name) else {
            return Err(CliError::UnknownCommand(line.to_string()));
        };
        if args.len() < spec.min_args || spec.max_args.is_some_and(|max| args.len() > max) {
            return Err(CliError::ArgumentMismatch(line.to_string()));
        }
        let result = apply(&current, &build_command(spec.name, &args));
        if !result.notices.is_empty() {
            let details: String = result
                .notices
                .iter()
                .map(|notice| format!("* {}\n", notice.message()))
                .collect();
            return Err(CliError::CommandFailed { command: line.to_string(), details });
        }
        current = result.windowgram;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[(usize, &str)]) -> String {
        let mut text = String::new();
        for &(count, line) in rows {
            for _ in 0..count {
                text.push_str(line);
                text.push('\n');
            }
        }
        text
    }

    fn seq(wg: &Windowgram, line: &str) -> Windowgram {
        run_sequence(wg, line).unwrap_or_else(|err| panic!("`{line}` failed: {err}"))
    }

    #[test]
    fn every_alias_resolves_to_its_command() {
        for (alias, name) in [
            ("size", "scale"),
            ("append", "add"),
            ("app", "add"),
            ("grid", "break"),
            ("panes", "break"),
            ("group", "join"),
            ("merge", "join"),
            ("glue", "join"),
        ] {
            assert_eq!(find_command(alias).map(|spec| spec.name), Some(name));
        }
    }

    #[test]
    fn unknown_commands_and_bad_arity_are_rejected() {
        let wg = Windowgram::new("1\n");
        assert!(matches!(
            run_sequence(&wg, "bogus 1"),
            Err(CliError::UnknownCommand(_))
        ));
        assert!(matches!(
            run_sequence(&wg, "mirror extra"),
            Err(CliError::ArgumentMismatch(_))
        ));
        assert!(matches!(
            run_sequence(&wg, "scale"),
            Err(CliError::ArgumentMismatch(_))
        ));
    }

    #[test]
    fn sequences_halt_on_notices() {
        let wg = Windowgram::new("1\n");
        let err = run_sequence(&wg, "scale 4x4 ; break 1 9x9 ; mirror");
        match err {
            Err(CliError::CommandFailed { details, .. }) => {
                assert!(details.contains("Grid is 81 panes"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn readme_demonstration_one() {
        let wg = Windowgram::new("1\n");

        let wg = seq(&wg, "scale 25x10");
        assert_eq!(wg.as_str(), grid(&[(10, &"1".repeat(25))]));

        let wg = seq(&wg, "add right 50%");
        let row = format!("{}{}", "1".repeat(25), "0".repeat(12));
        assert_eq!(wg.as_str(), grid(&[(10, &row)]));

        let wg = seq(&wg, "break 0 3x5 A");
        let left = "1".repeat(25);
        let broken = grid(&[
            (2, &format!("{left}AAAABBBBCCCC")),
            (2, &format!("{left}DDDDEEEEFFFF")),
            (2, &format!("{left}GGGGHHHHIIII")),
            (2, &format!("{left}JJJJKKKKLLLL")),
            (2, &format!("{left}MMMMNNNNOOOO")),
        ]);
        assert_eq!(wg.as_str(), broken);

        let wg = seq(&wg, "join ABC.z DG.B EH.L FI.N JM.b KN.l LO.n");
        let joined = grid(&[
            (2, &format!("{left}zzzzzzzzzzzz")),
            (4, &format!("{left}BBBBLLLLNNNN")),
            (4, &format!("{left}bbbbllllnnnn")),
        ]);
        assert_eq!(wg.as_str(), joined);
    }

    #[test]
    fn readme_demonstration_two() {
        let wg = Windowgram::new("1\n");
        let left = "1".repeat(25);

        let wg = seq(&wg, "scale 25x10 ; add right 50% ; break 0 3x5 A ; join ABC.z DG.B EH.L FI.N JM.b KN.l LO.n");
        assert_eq!(
            wg.as_str(),
            grid(&[
                (2, &format!("{left}zzzzzzzzzzzz")),
                (4, &format!("{left}BBBBLLLLNNNN")),
                (4, &format!("{left}bbbbllllnnnn")),
            ])
        );

        let wg = seq(&wg, "split 1 bottom 3 s");
        let bottom = "s".repeat(25);
        assert_eq!(
            wg.as_str(),
            grid(&[
                (2, &format!("{left}zzzzzzzzzzzz")),
                (4, &format!("{left}BBBBLLLLNNNN")),
                (1, &format!("{left}bbbbllllnnnn")),
                (3, &format!("{bottom}bbbbllllnnnn")),
            ])
        );

        let wg = seq(&wg, "rename Nn Dd");
        assert_eq!(
            wg.as_str(),
            grid(&[
                (2, &format!("{left}zzzzzzzzzzzz")),
                (4, &format!("{left}BBBBLLLLDDDD")),
                (1, &format!("{left}bbbblllldddd")),
                (3, &format!("{bottom}bbbblllldddd")),
            ])
        );

        let wg = seq(&wg, "swap z s Ll Dd");
        let zed = "z".repeat(25);
        assert_eq!(
            wg.as_str(),
            grid(&[
                (2, &format!("{left}ssssssssssss")),
                (4, &format!("{left}BBBBDDDDLLLL")),
                (1, &format!("{left}bbbbddddllll")),
                (3, &format!("{zed}bbbbddddllll")),
            ])
        );
    }
}
