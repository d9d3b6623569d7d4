//! Grid maze path-finding.
//!
//! A solution is a sequence of [`Move`]s executed from the agent's cell.
//! Its cost is the number of moves spent until the exit is entered; moves
//! into walls (or across a tunnel's sides) waste a step without moving.
//! Leaving the grid, running out of moves before the exit, or needing
//! `rows * cols` moves or more costs the full `rows * cols`.
//!
//! Grid characters: `0` empty, `1` wall, `2` vertical tunnel, `3`
//! horizontal tunnel, `5` agent, `8` exit.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{MetaheurError, Result};
use crate::ga::GaProblem;
use crate::operators::{column_shuffle_crossover, invert_mutation, swap_mutation};
use crate::sa::SaProblem;
use crate::tabu::TabuProblem;

/// Probability that a rearranging tweak swaps two moves rather than
/// reversing a run.
const SWAP_PROBABILITY: f64 = 0.6;

/// Probability that a resampling tweak swaps two moves.
const RESAMPLE_SWAP_PROBABILITY: f64 = 0.75;

/// Probability that a resampling tweak, when not swapping, redraws a run
/// of moves rather than reversing it.
const REDRAW_PROBABILITY: f64 = 0.8;

/// Probability that a random walk changes direction after a free step.
const TURN_PROBABILITY: f64 = 0.2;

/// Walks attempted before random initialisation falls back to wall following.
const MAX_RANDOM_WALKS: usize = 1000;

/// One step of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    U,
    R,
    D,
    L,
}

impl Move {
    /// All moves, clockwise from up.
    pub const ALL: [Move; 4] = [Move::U, Move::R, Move::D, Move::L];

    /// Row and column offsets.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::U => (-1, 0),
            Move::R => (0, 1),
            Move::D => (1, 0),
            Move::L => (0, -1),
        }
    }

    /// The next move clockwise.
    pub fn turn_right(self) -> Move {
        match self {
            Move::U => Move::R,
            Move::R => Move::D,
            Move::D => Move::L,
            Move::L => Move::U,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Move::U | Move::D)
    }

    /// Parses a string such as `"URRD"`.
    pub fn parse_path(s: &str) -> Result<Vec<Move>> {
        s.chars()
            .map(|c| match c {
                'U' => Ok(Move::U),
                'R' => Ok(Move::R),
                'D' => Ok(Move::D),
                'L' => Ok(Move::L),
                other => Err(MetaheurError::InvalidInput(format!(
                    "unknown move '{other}'"
                ))),
            })
            .collect()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Move::U => 'U',
            Move::R => 'R',
            Move::D => 'D',
            Move::L => 'L',
        };
        write!(f, "{c}")
    }
}

/// Renders a path as its move letters.
pub fn format_path(path: &[Move]) -> String {
    path.iter().map(Move::to_string).collect()
}

/// A cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Empty,
    Wall,
    VerticalTunnel,
    HorizontalTunnel,
    Agent,
    Exit,
}

impl Field {
    fn from_char(c: char) -> Option<Field> {
        match c {
            '0' => Some(Field::Empty),
            '1' => Some(Field::Wall),
            '2' => Some(Field::VerticalTunnel),
            '3' => Some(Field::HorizontalTunnel),
            '5' => Some(Field::Agent),
            '8' => Some(Field::Exit),
            _ => None,
        }
    }

    /// Whether `mv` runs along this cell's axis. Always true outside tunnels.
    fn allows(self, mv: Move) -> bool {
        match self {
            Field::VerticalTunnel => mv.is_vertical(),
            Field::HorizontalTunnel => !mv.is_vertical(),
            _ => true,
        }
    }
}

/// A parsed maze with a single agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    grid: Vec<Vec<Field>>,
    start: (usize, usize),
    rows: usize,
    cols: usize,
}

impl FromStr for Maze {
    type Err = MetaheurError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        Maze::from_rows(&lines)
    }
}

impl Maze {
    /// Builds a maze from its text rows.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let grid = rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.as_ref()
                    .trim()
                    .chars()
                    .map(|c| {
                        Field::from_char(c).ok_or_else(|| {
                            MetaheurError::InvalidInput(format!("unknown field '{c}' in row {r}"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let cols = grid.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MetaheurError::InvalidInput("empty maze".into()));
        }
        if grid.iter().any(|row| row.len() != cols) {
            return Err(MetaheurError::InvalidInput("maze rows differ in length".into()));
        }
        let start = grid
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.iter().position(|&f| f == Field::Agent).map(|c| (r, c)))
            .ok_or_else(|| MetaheurError::InvalidInput("maze has no agent".into()))?;

        Ok(Self {
            rows: grid.len(),
            cols,
            grid,
            start,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cost of a path that does not reach the exit.
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    fn step(&self, (r, c): (usize, usize), mv: Move) -> Option<(usize, usize)> {
        let (dr, dc) = mv.delta();
        let r = r.checked_add_signed(dr)?;
        let c = c.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    fn field(&self, (r, c): (usize, usize)) -> Field {
        self.grid[r][c]
    }

    /// Moves spent until the exit is entered.
    ///
    /// A path that never reaches the exit, leaves the grid or runs to
    /// `size()` moves costs `size()`.
    pub fn path_cost(&self, path: &[Move]) -> usize {
        let size = self.size();
        let mut pos = self.start;

        for (i, &mv) in path.iter().enumerate() {
            let cost = i + 1;
            if cost >= size {
                return size;
            }
            if !self.field(pos).allows(mv) {
                continue;
            }
            let Some(next) = self.step(pos, mv) else {
                return size;
            };
            match self.field(next) {
                Field::Exit => return cost,
                Field::Wall => {}
                field if field.allows(mv) => pos = next,
                _ => {}
            }
        }
        size
    }

    /// Swaps two moves (60%) or reverses a run of moves.
    pub fn tweak<R: Rng>(&self, mut path: Vec<Move>, rng: &mut R) -> Vec<Move> {
        if rng.random_bool(SWAP_PROBABILITY) {
            swap_mutation(&mut path, rng);
        } else {
            invert_mutation(&mut path, rng);
        }
        path
    }

    /// Swaps two moves (75%), otherwise redraws a run of moves at random
    /// (80%) or reverses it. Redrawing is the only tweak that changes how
    /// many moves of each kind the path holds.
    pub fn resampling_tweak<R: Rng>(&self, mut path: Vec<Move>, rng: &mut R) -> Vec<Move> {
        if rng.random_bool(RESAMPLE_SWAP_PROBABILITY) {
            swap_mutation(&mut path, rng);
        } else if rng.random_bool(REDRAW_PROBABILITY) {
            redraw_segment(&mut path, rng);
        } else {
            invert_mutation(&mut path, rng);
        }
        path
    }

    /// Keeps heading one way and turns clockwise when blocked, stepping into
    /// the exit as soon as it is adjacent. Gives up after `4 * size()` moves
    /// or when boxed in.
    pub fn wall_following_path(&self) -> Vec<Move> {
        let mut path = Vec::new();
        let mut pos = self.start;
        let mut heading = Move::R;
        let mut turns = 0;

        while path.len() < 4 * self.size() && turns < 4 {
            if let Some(mv) = Move::ALL
                .into_iter()
                .find(|&m| self.step(pos, m).is_some_and(|p| self.field(p) == Field::Exit))
            {
                path.push(mv);
                break;
            }
            match self.step(pos, heading) {
                Some(next) if self.field(next) != Field::Wall => {
                    pos = next;
                    path.push(heading);
                    turns = 0;
                }
                _ => {
                    heading = heading.turn_right();
                    turns += 1;
                }
            }
        }
        path
    }

    /// Random walk that ends on entering the exit.
    ///
    /// Each walk is at most a third of the grid long; after
    /// `MAX_RANDOM_WALKS` failed walks the wall follower is used.
    pub fn random_walk_path<R: Rng>(&self, rng: &mut R) -> Vec<Move> {
        let limit = (self.size() / 3).max(1);
        for _ in 0..MAX_RANDOM_WALKS {
            if let Some(path) = self.random_walk(limit, rng) {
                return path;
            }
        }
        self.wall_following_path()
    }

    fn random_walk<R: Rng>(&self, limit: usize, rng: &mut R) -> Option<Vec<Move>> {
        let mut path = Vec::new();
        let mut pos = self.start;
        let mut heading = random_move(rng);

        // Blocked attempts count too, so a sealed agent cannot spin forever.
        for _ in 0..4 * limit {
            if path.len() >= limit {
                return None;
            }
            match self.step(pos, heading).map(|p| (p, self.field(p))) {
                Some((_, Field::Exit)) => {
                    path.push(heading);
                    return Some(path);
                }
                Some((next, field)) if field != Field::Wall => {
                    pos = next;
                    path.push(heading);
                    if rng.random_bool(TURN_PROBABILITY) {
                        heading = random_move(rng);
                    }
                }
                _ => heading = random_move(rng),
            }
        }
        None
    }
}

fn random_move<R: Rng>(rng: &mut R) -> Move {
    Move::ALL[rng.random_range(0..Move::ALL.len())]
}

/// Replaces a random run `[i, j)` with fresh random moves. Length is kept.
pub fn redraw_segment<R: Rng>(path: &mut [Move], rng: &mut R) {
    let n = path.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n - 1);
    let j = rng.random_range(i..=n);
    for mv in &mut path[i..j] {
        *mv = random_move(rng);
    }
}

/// Neighborhood used by [`MazeProblem`] for tweaks and mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Neighborhood {
    /// Swap or reverse: [`Maze::tweak`].
    #[default]
    Rearrange,
    /// Swap, redraw or reverse: [`Maze::resampling_tweak`].
    Resample,
}

/// How a [`MazeProblem`] builds its starting path.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialPath {
    WallFollowing,
    RandomWalk,
    Given(Vec<Move>),
}

/// Shortest exit path search.
#[derive(Debug, Clone)]
pub struct MazeProblem {
    maze: Maze,
    initial: InitialPath,
    neighborhood: Neighborhood,
}

impl MazeProblem {
    pub fn new(maze: Maze, initial: InitialPath) -> Self {
        Self {
            maze,
            initial,
            neighborhood: Neighborhood::default(),
        }
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    fn start<R: Rng>(&self, rng: &mut R) -> Vec<Move> {
        match &self.initial {
            InitialPath::WallFollowing => self.maze.wall_following_path(),
            InitialPath::RandomWalk => self.maze.random_walk_path(rng),
            InitialPath::Given(path) => path.clone(),
        }
    }

    fn cost(&self, path: &[Move]) -> f64 {
        self.maze.path_cost(path) as f64
    }

    fn neighbor<R: Rng>(&self, path: Vec<Move>, rng: &mut R) -> Vec<Move> {
        match self.neighborhood {
            Neighborhood::Rearrange => self.maze.tweak(path, rng),
            Neighborhood::Resample => self.maze.resampling_tweak(path, rng),
        }
    }
}

impl SaProblem for MazeProblem {
    type Solution = Vec<Move>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<Move> {
        self.start(rng)
    }

    fn quality(&self, path: &Vec<Move>) -> f64 {
        self.cost(path)
    }

    fn tweak<R: Rng>(&self, path: Vec<Move>, rng: &mut R) -> Vec<Move> {
        self.neighbor(path, rng)
    }
}

impl TabuProblem for MazeProblem {
    type Solution = Vec<Move>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<Move> {
        self.start(rng)
    }

    fn quality(&self, path: &Vec<Move>) -> f64 {
        self.cost(path)
    }

    fn tweak<R: Rng>(&self, path: Vec<Move>, rng: &mut R) -> Vec<Move> {
        self.neighbor(path, rng)
    }
}

impl GaProblem for MazeProblem {
    type Individual = Vec<Move>;

    fn fitness(&self, path: &Vec<Move>) -> f64 {
        self.cost(path)
    }

    fn crossover<R: Rng>(&self, [a, b]: [Vec<Move>; 2], rng: &mut R) -> [Vec<Move>; 2] {
        let (c, d) = column_shuffle_crossover(&a, &b, rng);
        [c, d]
    }

    fn mutate<R: Rng>(&self, path: Vec<Move>, rng: &mut R) -> Vec<Move> {
        self.neighbor(path, rng)
    }
}
