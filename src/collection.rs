use crate::buzzer::{Buzzer, BuzzerState, TickEvent};
use crate::command::BuzzerCommand;
use crate::output::{FrequencyOutput, LevelOutput, OutputCapability};

/// An identifier for a buzzer within a [`BuzzerBank`].
///
/// The id doubles as the slot index, so it must be below the bank capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerId(pub usize);

impl From<usize> for BuzzerId {
    fn from(id: usize) -> Self {
        BuzzerId(id)
    }
}

impl From<BuzzerId> for usize {
    fn from(id: BuzzerId) -> Self {
        id.0
    }
}

/// Errors that can occur during bank operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionError {
    /// The specified buzzer does not exist in the bank.
    InvalidBuzzerId(BuzzerId),

    /// Attempted to add a buzzer with an ID that already exists.
    DuplicateBuzzerId(BuzzerId),

    /// The buzzer ID exceeds the bank's capacity.
    BuzzerIdOutOfBounds { id: BuzzerId, capacity: usize },
}

impl core::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CollectionError::InvalidBuzzerId(id) => {
                write!(f, "buzzer ID {} does not exist in bank", id.0)
            }
            CollectionError::DuplicateBuzzerId(id) => {
                write!(f, "buzzer ID {} already exists in bank", id.0)
            }
            CollectionError::BuzzerIdOutOfBounds { id, capacity } => {
                write!(
                    f,
                    "buzzer ID {} exceeds bank capacity of {}",
                    id.0, capacity
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollectionError {}

/// A fixed set of independent buzzers ticked from one periodic source.
///
/// Buzzers share nothing but the call to [`tick_all`](Self::tick_all); each
/// keeps its own output, tick interval, playback and completion handler.
///
/// # Type Parameters
/// * `'a` - Lifetime of borrowed melody tables
/// * `L` - Level output type (same for all buzzers in the bank)
/// * `F` - Frequency output type (same for all buzzers in the bank)
/// * `MAX` - Maximum number of buzzers this bank can hold
pub struct BuzzerBank<'a, L, F, const MAX: usize> {
    buzzers: [Option<Buzzer<'a, L, F>>; MAX],
}

impl<'a, L, F, const MAX: usize> BuzzerBank<'a, L, F, MAX>
where
    L: LevelOutput,
    F: FrequencyOutput,
{
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self {
            buzzers: core::array::from_fn(|_| None),
        }
    }

    /// Adds a buzzer driving `output` under the given id.
    ///
    /// # Errors
    /// * `DuplicateBuzzerId` - A buzzer with this ID already exists
    /// * `BuzzerIdOutOfBounds` - The ID exceeds the bank's capacity
    pub fn add(
        &mut self,
        id: BuzzerId,
        output: OutputCapability<L, F>,
        tick_interval_ms: u32,
    ) -> Result<&mut Buzzer<'a, L, F>, CollectionError> {
        let idx = id.0;

        if idx >= MAX {
            return Err(CollectionError::BuzzerIdOutOfBounds { id, capacity: MAX });
        }

        if self.buzzers[idx].is_some() {
            return Err(CollectionError::DuplicateBuzzerId(id));
        }

        Ok(self.buzzers[idx].insert(Buzzer::with_output(output, tick_interval_ms)))
    }

    /// Removes a buzzer, silencing it first, and returns its output.
    ///
    /// # Errors
    /// Returns `InvalidBuzzerId` if the buzzer does not exist in the bank.
    pub fn remove(&mut self, id: BuzzerId) -> Result<OutputCapability<L, F>, CollectionError> {
        let mut buzzer = self
            .buzzers
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(CollectionError::InvalidBuzzerId(id))?;

        buzzer.stop();
        buzzer.release().ok_or(CollectionError::InvalidBuzzerId(id))
    }

    /// Returns the buzzer with the given id.
    ///
    /// # Errors
    /// Returns `InvalidBuzzerId` if the buzzer does not exist in the bank.
    pub fn get(&self, id: BuzzerId) -> Result<&Buzzer<'a, L, F>, CollectionError> {
        self.buzzers
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(CollectionError::InvalidBuzzerId(id))
    }

    /// Returns the buzzer with the given id for direct control.
    ///
    /// # Errors
    /// Returns `InvalidBuzzerId` if the buzzer does not exist in the bank.
    pub fn get_mut(&mut self, id: BuzzerId) -> Result<&mut Buzzer<'a, L, F>, CollectionError> {
        self.buzzers
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CollectionError::InvalidBuzzerId(id))
    }

    /// Routes a command to the buzzer it targets.
    ///
    /// # Errors
    /// Returns `InvalidBuzzerId` if the buzzer does not exist in the bank.
    pub fn handle_command(
        &mut self,
        command: BuzzerCommand<'a, BuzzerId>,
    ) -> Result<(), CollectionError> {
        self.get_mut(command.buzzer_id)?
            .handle_action(command.action);
        Ok(())
    }

    /// Ticks every buzzer once and returns how many completed on this tick.
    pub fn tick_all(&mut self) -> usize {
        self.buzzers
            .iter_mut()
            .flatten()
            .map(|buzzer| buzzer.tick())
            .filter(|event| *event == TickEvent::Complete)
            .count()
    }

    /// Stops every buzzer in the bank.
    pub fn stop_all(&mut self) {
        for buzzer in self.buzzers.iter_mut().flatten() {
            buzzer.stop();
        }
    }

    /// Returns the playback state of the specified buzzer.
    ///
    /// # Errors
    /// Returns `InvalidBuzzerId` if the buzzer does not exist in the bank.
    pub fn state(&self, id: BuzzerId) -> Result<BuzzerState, CollectionError> {
        Ok(self.get(id)?.state())
    }

    /// Returns true if any buzzer is playing.
    pub fn any_active(&self) -> bool {
        self.buzzers.iter().flatten().any(Buzzer::is_active)
    }

    /// Returns the number of buzzers currently in the bank.
    pub fn len(&self) -> usize {
        self.buzzers.iter().filter(|b| b.is_some()).count()
    }

    /// Returns true if the bank contains no buzzers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        MAX
    }

    /// Returns true if the bank contains a buzzer with the given ID.
    pub fn contains(&self, id: BuzzerId) -> bool {
        self.get(id).is_ok()
    }
}

impl<L: LevelOutput, F: FrequencyOutput, const MAX: usize> Default for BuzzerBank<'_, L, F, MAX> {
    fn default() -> Self {
        Self::new()
    }
}
