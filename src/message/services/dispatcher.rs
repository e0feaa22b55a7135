//! Discriminant-to-constructor dispatch shared by the four families.

use crate::message::{
    domain::{Envelope, MessageKind, PropertyBag},
    error::InvalidMessage,
    ports::FamilyMessage,
    validation::{FieldReader, validate_envelope, validate_requirements},
};
use mockable::Clock;
use std::collections::HashMap;
use tracing::debug;

/// Builds the kind-specific message once the envelope and the declared
/// requirements have been validated.
pub type Constructor<K, M> = fn(Envelope<K>, &FieldReader<'_>) -> Result<M, InvalidMessage>;

/// Read-only table mapping each discriminant of a family to its constructor.
///
/// Each family builds one dispatcher on first use and shares it for the
/// lifetime of the process.
///
/// # Examples
///
/// ```
/// use ingest_messages::message::services::Dispatcher;
/// use ingest_messages::{PropertyBag, task};
/// use mockable::DefaultClock;
///
/// let dispatcher: &Dispatcher<_, _> = task::dispatcher();
/// let props = PropertyBag::new().with("query", "{}").with("index", "docs");
/// let message = dispatcher
///     .dispatch("TASK_DELETE", &props, &DefaultClock)
///     .expect("valid delete");
/// assert!(matches!(message, task::TaskMessage::Delete(_)));
/// assert!(dispatcher.dispatch("TASK_UNKNOWN", &props, &DefaultClock).is_err());
/// ```
pub struct Dispatcher<K: MessageKind, M> {
    constructors: HashMap<&'static str, (K, Constructor<K, M>)>,
}

impl<K, M> Dispatcher<K, M>
where
    K: MessageKind,
    M: FamilyMessage<Kind = K>,
{
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers the constructor for `kind`, replacing any previous one.
    #[must_use]
    pub fn register(mut self, kind: K, constructor: Constructor<K, M>) -> Self {
        self.constructors.insert(kind.as_str(), (kind, constructor));
        self
    }

    /// Returns `true` if a constructor is registered for `discriminant`.
    #[must_use]
    pub fn supports(&self, discriminant: &str) -> bool {
        self.constructors.contains_key(discriminant)
    }

    /// Returns the registered kinds in enumeration order.
    #[must_use]
    pub fn kinds(&self) -> Vec<K> {
        K::ALL
            .iter()
            .copied()
            .filter(|kind| self.supports(kind.as_str()))
            .collect()
    }

    /// Resolves `discriminant` and constructs the message.
    ///
    /// Runs base validation, then the kind's declared requirements (presence
    /// and shape, in declaration order), then the kind's constructor. The
    /// first failure aborts construction.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMessage::UnknownType`] for an unregistered
    /// discriminant, or the first validation failure otherwise.
    pub fn dispatch(
        &self,
        discriminant: &str,
        props: &PropertyBag,
        clock: &impl Clock,
    ) -> Result<M, InvalidMessage> {
        let result = self.construct(discriminant, props, clock);
        match &result {
            Ok(message) => debug!(
                family = %K::FAMILY,
                message_type = message.type_name(),
                message_id = %message.id(),
                "message constructed"
            ),
            Err(error) => debug!(
                family = %K::FAMILY,
                discriminant,
                %error,
                "message rejected"
            ),
        }
        result
    }

    fn construct(
        &self,
        discriminant: &str,
        props: &PropertyBag,
        clock: &dyn Clock,
    ) -> Result<M, InvalidMessage> {
        let &(kind, constructor) = self
            .constructors
            .get(discriminant)
            .ok_or_else(|| InvalidMessage::unknown_type(K::FAMILY, discriminant))?;

        let fields = FieldReader::new(kind.as_str(), props, clock);
        let envelope = validate_envelope(kind, &fields)?;
        validate_requirements(&fields, kind.requirements())?;
        constructor(envelope, &fields)
    }
}

impl<K, M> Default for Dispatcher<K, M>
where
    K: MessageKind,
    M: FamilyMessage<Kind = K>,
{
    fn default() -> Self {
        Self::new()
    }
}
