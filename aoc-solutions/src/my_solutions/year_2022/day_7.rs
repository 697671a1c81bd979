use crate::utils::fs_tree::{FsTree, NodeKind, PathIndex, TreeBuilder};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const SMALL_DIR_LIMIT: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const SPACE_NEEDED: u64 = 30_000_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["2022", "parsing", "tree"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    tree: FsTree,
    index: PathIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CdTarget<'a> {
    Root,
    Parent,
    Child(&'a str),
}

/// One line of the terminal transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TerminalLine<'a> {
    Cd(CdTarget<'a>),
    Ls,
    Dir(&'a str),
    File { size: u64, name: &'a str },
}

fn classify(line: &str) -> Result<TerminalLine<'_>, anyhow::Error> {
    if let Some(command) = line.strip_prefix("$ ") {
        let command = command.trim();
        if command == "ls" {
            return Ok(TerminalLine::Ls);
        }
        let Some(target) = command.strip_prefix("cd ") else {
            bail!("unknown command `{}`", command);
        };
        let target = match target.trim() {
            "/" => CdTarget::Root,
            ".." => CdTarget::Parent,
            "" => bail!("`cd` without a target"),
            name => CdTarget::Child(name),
        };
        return Ok(TerminalLine::Cd(target));
    }

    let (head, name) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("unrecognised line `{}`", line))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("listing entry without a name");
    }
    if head == "dir" {
        return Ok(TerminalLine::Dir(name));
    }
    let size = head
        .parse()
        .with_context(|| format!("bad file size `{}`", head))?;
    Ok(TerminalLine::File { size, name })
}

fn apply(builder: &mut TreeBuilder, line: TerminalLine<'_>) -> Result<(), anyhow::Error> {
    match line {
        TerminalLine::Cd(CdTarget::Root) => builder.reset_to_root(),
        TerminalLine::Cd(CdTarget::Parent) => builder.ascend()?,
        TerminalLine::Cd(CdTarget::Child(name)) => builder.descend(name)?,
        TerminalLine::Ls => {}
        TerminalLine::Dir(name) => {
            builder.register_child(name, NodeKind::Directory)?;
        }
        TerminalLine::File { size, name } => {
            builder.register_child(name, NodeKind::File { size })?;
        }
    }
    Ok(())
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut builder = TreeBuilder::new();
        let mut seen_any = false;
        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            seen_any = true;
            classify(line)
                .and_then(|classified| apply(&mut builder, classified))
                .map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {:#}", line_idx + 1, e))
                })?;
        }
        if !seen_any {
            return Err(ParseError::MissingData("empty transcript".to_string()));
        }

        let tree = builder.finish();
        let index = PathIndex::build(&tree);
        log::debug!("day 7: indexed {} directories", index.len());
        Ok(SharedData { tree, index })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .tree
            .sum_of_dirs_below(SMALL_DIR_LIMIT)
            .map(|total| total.to_string())
            .ok_or_else(|| SolveError::failed("sum of small directories overflows u64"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let used = shared.index.size_of(&shared.tree, "/");
        let free = DISK_SIZE.checked_sub(used).ok_or_else(|| {
            SolveError::failed(format!("{} bytes used on a {} byte disk", used, DISK_SIZE))
        })?;
        let threshold = SPACE_NEEDED.saturating_sub(free);
        let (id, size) = shared
            .tree
            .smallest_dir_at_least(threshold)
            .ok_or_else(|| SolveError::failed("no directory frees enough space"))?;
        log::debug!(
            "day 7: deleting {} frees {} bytes",
            shared.tree.absolute_path(id),
            size
        );
        Ok(size.to_string())
    }
}
