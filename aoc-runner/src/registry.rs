//! Registry for looking up and creating solver instances by year and day

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynPuzzle, PuzzleInstance};
use crate::solver::PuzzleSolver;

/// Base year (first year of Advent of Code)
pub const BASE_YEAR: u16 = 2015;
/// Maximum number of years supported (2015-2034)
pub const MAX_YEARS: usize = 20;
/// Days per year (1-25)
pub const DAYS_PER_YEAR: usize = 25;
/// Total capacity of the flat storage
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Calculate flat index from year/day, returning None if out of bounds
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

/// Reconstruct year/day from flat index
#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Thread-safe factory function type for creating solver instances
pub type PuzzleFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynPuzzle + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleInfo {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
}

/// Factory entry with metadata
struct FactoryEntry {
    factory: PuzzleFactory,
    parts: u8,
}

/// Immutable storage for solver factories with O(1) access
///
/// Uses a flat Vec with index math for efficient storage and lookup.
pub struct PuzzleStorage {
    entries: Vec<Option<FactoryEntry>>,
}

impl PuzzleStorage {
    /// Iterate over metadata for all registered factories, in year/day order
    pub fn iter_info(&self) -> impl Iterator<Item = PuzzleInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                PuzzleInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    /// Get metadata for a specific factory
    pub fn get_info(&self, year: u16, day: u8) -> Option<PuzzleInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| PuzzleInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    /// Check if a factory exists for year/day
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

/// Builder for constructing a [`PuzzleRegistry`]
///
/// The builder pattern allows for method chaining and ensures the registry
/// is immutable after construction. Duplicate registration is detected at
/// registration time.
///
/// # Example
///
/// ```no_run
/// # use aoc_runner::RegistryBuilder;
/// let registry = RegistryBuilder::new()
///     .register_all_plugins()
///     .unwrap()
///     .build();
/// ```
pub struct RegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("RegistryBuilder")
            .field("registered", &registered)
            .finish()
    }
}

impl RegistryBuilder {
    /// Create a new empty registry builder with pre-allocated storage
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a solver factory with an explicit parts count
    ///
    /// Returns an error if year/day is out of bounds or already registered.
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynPuzzle + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        self.entries[index] = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register all solver plugins collected via `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins(|_| true)
    }

    /// Register solver plugins that match the given filter predicate
    ///
    /// Only registers plugins for which the filter returns `true`, allowing
    /// selective registration based on tags, year, day, or other criteria.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use aoc_runner::RegistryBuilder;
    /// // Register only 2024 solvers
    /// let registry = RegistryBuilder::new()
    ///     .register_plugins(|plugin| plugin.year == 2024)
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&PuzzlePlugin) -> bool,
    {
        for plugin in inventory::iter::<PuzzlePlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder and create an immutable registry
    pub fn build(self) -> PuzzleRegistry {
        PuzzleRegistry {
            storage: PuzzleStorage {
                entries: self.entries,
            },
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry mapping (year, day) to solver factories
pub struct PuzzleRegistry {
    storage: PuzzleStorage,
}

impl PuzzleRegistry {
    /// Get readonly access to the factory storage for iteration/lookup
    pub fn storage(&self) -> &PuzzleStorage {
        &self.storage
    }

    /// Create a solver instance by invoking the factory for a specific year/day
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynPuzzle>)` - Successfully parsed and created solver
    /// * `Err(SolverError)` - Solver not found or parsing failed
    pub fn create<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynPuzzle + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .storage
            .entries
            .get(index)
            .and_then(|e| e.as_ref())
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

/// Trait for solvers that can register themselves with a registry builder
///
/// This trait provides a type-erased interface with no associated types, so
/// different solver types can be collected in a single plugin container.
/// Any type implementing [`PuzzleSolver`] gets this for free through a
/// blanket impl.
pub trait RegisterableSolver: Sync {
    /// Register this solver type with the builder for a specific year and day
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError>;

    /// Get the number of parts this solver supports
    fn parts(&self) -> u8;
}

fn make_instance<'a, S: PuzzleSolver + 'a>(
    year: u16,
    day: u8,
    input: &'a str,
) -> Result<Box<dyn DynPuzzle + 'a>, ParseError> {
    Ok(Box::new(PuzzleInstance::<S>::new(year, day, input)?))
}

impl<S> RegisterableSolver for S
where
    S: PuzzleSolver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, move |input| {
            make_instance::<S>(year, day, input)
        })
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// Plugin information for automatic solver registration
///
/// Solvers submit one of these via `inventory::submit!` (normally through
/// `#[derive(RegisterPuzzle)]`); the registry builder sweeps them up with
/// [`RegistryBuilder::register_all_plugins`].
pub struct PuzzlePlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The solver instance (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Optional tags for filtering (e.g. "2024", "grid", "slow")
    pub tags: &'static [&'static str],
}

inventory::collect!(PuzzlePlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::PuzzleParser;

    struct Echo;

    impl PuzzleParser for Echo {
        type Input<'a> = &'a str;

        fn parse<'a>(text: &'a str) -> Result<Self::Input<'a>, ParseError> {
            Ok(text)
        }
    }

    impl PuzzleSolver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(input: &mut Self::Input<'_>, part: u8) -> Result<String, SolveError> {
            Ok(format!("{}:{}", part, input))
        }
    }

    #[test]
    fn index_round_trips_over_full_capacity() {
        for i in 0..CAPACITY {
            let (year, day) = from_index(i);
            assert_eq!(calc_index(year, day), Some(i));
        }
    }

    #[test]
    fn index_rejects_out_of_range() {
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(BASE_YEAR + MAX_YEARS as u16, 1), None);
        assert_eq!(calc_index(2024, 0), None);
        assert_eq!(calc_index(2024, 26), None);
    }

    #[test]
    fn register_and_create() {
        let registry = Echo
            .register_with(RegistryBuilder::new(), 2024, 16)
            .unwrap()
            .build();

        assert!(registry.storage().contains(2024, 16));
        assert_eq!(
            registry.storage().get_info(2024, 16),
            Some(PuzzleInfo {
                year: 2024,
                day: 16,
                parts: 2
            })
        );

        let mut solver = registry.create(2024, 16, "hello").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "1:hello");
        assert_eq!(solver.solve(2).unwrap().answer, "2:hello");
        assert!(matches!(
            solver.solve(3),
            Err(SolveError::PartOutOfRange(3))
        ));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let builder = Echo
            .register_with(RegistryBuilder::new(), 2024, 16)
            .unwrap();
        let err = Echo.register_with(builder, 2024, 16).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateSolver(2024, 16)));
    }

    #[test]
    fn missing_solver_reports_not_found() {
        let registry = RegistryBuilder::new().build();
        assert!(matches!(
            registry.create(2024, 16, ""),
            Err(SolverError::NotFound(2024, 16))
        ));
        assert!(matches!(
            registry.create(1999, 1, ""),
            Err(SolverError::InvalidYearDay(1999, 1))
        ));
    }
}
