use std::fmt;

/// Category of the animal an answer names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalType {
    Dog = 0,
    Cat = 1,
    Rabbit = 2,
    Turtle = 3,
}

impl AnimalType {
    pub fn emoji(self) -> char {
        match self {
            AnimalType::Dog => '🐶',
            AnimalType::Cat => '🐱',
            AnimalType::Rabbit => '🐰',
            AnimalType::Turtle => '🐢',
        }
    }
}

impl TryFrom<i32> for AnimalType {
    type Error = UnknownKind;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AnimalType::Dog),
            1 => Ok(AnimalType::Cat),
            2 => Ok(AnimalType::Rabbit),
            3 => Ok(AnimalType::Turtle),
            other => Err(UnknownKind(other)),
        }
    }
}

/// How a player is expected to respond to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Single = 1,
    Multiple = 2,
    Ranged = 3,
}

impl TryFrom<i32> for ResponseType {
    type Error = UnknownKind;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ResponseType::Single),
            2 => Ok(ResponseType::Multiple),
            3 => Ok(ResponseType::Ranged),
            other => Err(UnknownKind(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownKind(pub i32);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animal_types_cover_zero_to_three() {
        assert_eq!(AnimalType::try_from(0), Ok(AnimalType::Dog));
        assert_eq!(AnimalType::try_from(3), Ok(AnimalType::Turtle));
        assert_eq!(AnimalType::try_from(4), Err(UnknownKind(4)));
        assert_eq!(AnimalType::Cat.emoji(), '🐱');
    }

    #[test]
    fn response_types_start_at_one() {
        assert_eq!(ResponseType::try_from(0), Err(UnknownKind(0)));
        assert_eq!(ResponseType::try_from(1), Ok(ResponseType::Single));
        assert_eq!(ResponseType::try_from(3), Ok(ResponseType::Ranged));
    }
}
