//! Declarative macro for writing puzzle definitions.

/// Declare a [`PuzzleDefinition`](crate::core::PuzzleDefinition) inline.
///
/// Each category is `label => Tier [members...]`, where `Tier` names a
/// [`Difficulty`](crate::core::Difficulty) variant. The result is not
/// validated; call `validate()` or load it through the engine.
///
/// # Example
///
/// ```
/// use connections::puzzle;
///
/// let definition = puzzle! {
///     id: "2024-01-10";
///     "Fruits" => Straightforward ["APPLE", "PEAR", "PLUM", "FIG"],
///     "Colors" => Moderate ["RED", "BLUE", "GREEN", "GRAPE"],
///     "Planets" => Hard ["MARS", "VENUS", "EARTH", "SATURN"],
///     "Metals" => Tricky ["IRON", "GOLD", "TIN", "LEAD"],
/// };
///
/// assert_eq!(definition.categories.len(), 4);
/// assert!(definition.validate().is_success());
/// ```
#[macro_export]
macro_rules! puzzle {
    (
        id: $id:expr;
        $(
            $label:expr => $difficulty:ident [ $($member:expr),* $(,)? ]
        ),* $(,)?
    ) => {
        $crate::core::PuzzleDefinition::new(
            $id,
            vec![
                $(
                    $crate::core::Category::new(
                        $label,
                        $crate::core::Difficulty::$difficulty,
                        [$($member),*],
                    )
                ),*
            ],
        )
    };
}
