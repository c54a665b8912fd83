//! Frame resolution.
//!
//! Translates a [`ViewTree`] and its constraints into a Cassowary system,
//! solves it with [`kasuari`], and writes the resulting frames back.
//!
//! # Model
//!
//! Every view contributes four variables (`x`, `y`, `width`, `height`) in
//! root coordinates. Attributes are linear expressions of them:
//!
//! | Attribute | Expression |
//! |---|---|
//! | left / top | `x` / `y` |
//! | right / bottom | `x + width` / `y + height` |
//! | centerX / centerY | `x + width / 2` / `y + height / 2` |
//! | width / height | `width` / `height` |
//!
//! Constraints are added in this order:
//!
//! 1. Root origins (and root sizes while the root translates its frame).
//! 2. Frames of subviews that still translate their frame into constraints.
//! 3. Every [`LayoutConstraint`] in the tree, at required strength. A
//!    constraint the solver rejects is skipped and reported in
//!    [`Resolution::broken`].
//! 4. Non-negative sizes. A size bound the installed constraints already
//!    violate is reported in [`Resolution::broken`] as `width >= 0` or
//!    `height >= 0`.
//! 5. Intrinsic content size (hugging and compression resistance) and a weak
//!    preference for each view's current frame.

use kasuari::{
    AddConstraintError, Constraint, Expression, RelationalOperator, Solver, Term, Variable,
};

use crate::config::{LayoutConfig, Priority};
use crate::constraint::{Anchor, Attribute, LayoutConstraint, Relation};
use crate::error::LayoutError;
use crate::geometry::Frame;
use crate::tree::{ViewId, ViewTree};

/// Outcome of a successful [`resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Constraints the solver could not satisfy and therefore skipped.
    ///
    /// Includes the implicit `width >= 0` / `height >= 0` bound of any view
    /// whose installed constraints force a negative size.
    pub broken: Vec<LayoutConstraint>,
}

impl Resolution {
    /// Returns `true` if every constraint was honoured.
    pub fn is_satisfied(&self) -> bool {
        self.broken.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct FrameVars {
    x: Variable,
    y: Variable,
    width: Variable,
    height: Variable,
}

impl FrameVars {
    fn new() -> Self {
        Self {
            x: Variable::new(),
            y: Variable::new(),
            width: Variable::new(),
            height: Variable::new(),
        }
    }

    /// Terms of `attribute`, each scaled by `scale`.
    fn terms(&self, attribute: Attribute, scale: f64) -> Vec<Term> {
        match attribute {
            Attribute::Left => vec![Term::new(self.x, scale)],
            Attribute::Top => vec![Term::new(self.y, scale)],
            Attribute::Right => vec![Term::new(self.x, scale), Term::new(self.width, scale)],
            Attribute::Bottom => vec![Term::new(self.y, scale), Term::new(self.height, scale)],
            Attribute::CenterX => vec![
                Term::new(self.x, scale),
                Term::new(self.width, scale * 0.5),
            ],
            Attribute::CenterY => vec![
                Term::new(self.y, scale),
                Term::new(self.height, scale * 0.5),
            ],
            Attribute::Width => vec![Term::new(self.width, scale)],
            Attribute::Height => vec![Term::new(self.height, scale)],
        }
    }
}

fn operator(relation: Relation) -> RelationalOperator {
    match relation {
        Relation::Equal => RelationalOperator::Equal,
        Relation::GreaterThanOrEqual => RelationalOperator::GreaterOrEqual,
        Relation::LessThanOrEqual => RelationalOperator::LessOrEqual,
    }
}

/// `terms + constant <op> 0`
fn linear(
    terms: Vec<Term>,
    constant: f64,
    op: RelationalOperator,
    priority: Priority,
) -> Constraint {
    Constraint::new(Expression::new(terms, constant), op, priority.strength())
}

/// `variable <op> value`
fn bound(variable: Variable, op: RelationalOperator, value: f64, priority: Priority) -> Constraint {
    linear(vec![Term::new(variable, 1.0)], -value, op, priority)
}

/// `variable == value`, required.
fn fixed(variable: Variable, value: f64) -> Constraint {
    bound(variable, RelationalOperator::Equal, value, Priority::Required)
}

/// `variable - origin == offset`
fn offset_from(
    variable: Variable,
    origin: Variable,
    offset: f64,
    priority: Priority,
) -> Constraint {
    linear(
        vec![Term::new(variable, 1.0), Term::new(origin, -1.0)],
        -offset,
        RelationalOperator::Equal,
        priority,
    )
}

struct System {
    solver: Solver,
    vars: Vec<FrameVars>,
}

impl System {
    fn new(views: usize) -> Self {
        Self {
            solver: Solver::new(),
            vars: (0..views).map(|_| FrameVars::new()).collect(),
        }
    }

    fn vars(&self, view: ViewId) -> Result<FrameVars, LayoutError> {
        self.vars
            .get(view.index())
            .copied()
            .ok_or(LayoutError::UnknownView(view))
    }

    /// Add a constraint. Returns `Ok(false)` if the solver found it unsatisfiable.
    fn add(&mut self, constraint: Constraint) -> Result<bool, LayoutError> {
        match self.solver.add_constraint(constraint) {
            Ok(()) => Ok(true),
            Err(AddConstraintError::UnsatisfiableConstraint) => Ok(false),
            #[allow(clippy::use_debug)]
            Err(other) => {
                tracing::error!(error = ?other, "solver rejected constraint");
                Err(LayoutError::Solver(format!("{other:?}")))
            }
        }
    }

    fn anchor_terms(&self, anchor: Anchor, scale: f64) -> Result<Vec<Term>, LayoutError> {
        Ok(self.vars(anchor.view)?.terms(anchor.attribute, scale))
    }

    /// `first - multiplier * second - constant <relation> 0`
    fn translate(&self, constraint: &LayoutConstraint) -> Result<Constraint, LayoutError> {
        let mut terms = self.anchor_terms(constraint.first, 1.0)?;
        if let Some(second) = constraint.second {
            terms.extend(self.anchor_terms(second, -constraint.multiplier)?);
        }
        Ok(linear(
            terms,
            -constraint.constant,
            operator(constraint.relation),
            Priority::Required,
        ))
    }

    fn value(&self, variable: Variable) -> f64 {
        self.solver.get_value(variable)
    }
}

/// Solve all constraints in `tree` and store the resulting frames.
///
/// Frames are written in each view's parent coordinate space. Root frames are
/// left untouched, except that a root which no longer translates its frame
/// takes its size from its constraints.
///
/// # Errors
///
/// - [`LayoutError::UnknownView`] if a constraint mentions a view outside `tree`
/// - [`LayoutError::Solver`] if the solver fails internally
///
/// Unsatisfiable constraints are not errors; see [`Resolution::broken`].
pub fn resolve(tree: &mut ViewTree, config: &LayoutConfig) -> Result<Resolution, LayoutError> {
    let mut system = System::new(tree.len());
    let mut resolution = Resolution::default();
    let views: Vec<ViewId> = tree.views().collect();

    // 1 + 2: origins and translated frames.
    for &view in &views {
        let vars = system.vars(view)?;
        let frame = tree.frame(view).unwrap_or_default();
        let translates = tree.translates_frame_into_constraints(view);

        let mut structural = Vec::with_capacity(4);
        match tree.parent(view) {
            None => {
                structural.push(fixed(vars.x, frame.x));
                structural.push(fixed(vars.y, frame.y));
            }
            Some(parent) if translates => {
                let origin = system.vars(parent)?;
                structural.push(offset_from(vars.x, origin.x, frame.x, Priority::Required));
                structural.push(offset_from(vars.y, origin.y, frame.y, Priority::Required));
            }
            Some(_) => {}
        }
        if translates {
            structural.push(fixed(vars.width, frame.width));
            structural.push(fixed(vars.height, frame.height));
        }
        for constraint in structural {
            if !system.add(constraint)? {
                tracing::warn!(
                    view = %view,
                    frame = %frame,
                    "frame constraint unsatisfiable, skipped"
                );
            }
        }
    }

    // 3: installed constraints.
    for (owner, constraint) in tree.all_constraints() {
        let translated = system.translate(constraint)?;
        if !system.add(translated)? {
            tracing::warn!(
                owner = %owner,
                constraint = %constraint,
                "unsatisfiable constraint, breaking it"
            );
            resolution.broken.push(*constraint);
        }
    }

    // 4 + 5: non-negative sizes, then soft preferences.
    for &view in &views {
        let vars = system.vars(view)?;
        let sizes = [(vars.width, Attribute::Width), (vars.height, Attribute::Height)];
        for (size, attribute) in sizes {
            let non_negative =
                bound(size, RelationalOperator::GreaterOrEqual, 0.0, Priority::Required);
            if !system.add(non_negative)? {
                tracing::warn!(view = %view, %attribute, "negative size forced by constraints");
                resolution.broken.push(LayoutConstraint::fixed(
                    view,
                    attribute,
                    Relation::GreaterThanOrEqual,
                    0.0,
                ));
            }
        }

        if let Some(intrinsic) = tree.intrinsic_size(view) {
            for (size, value) in [(vars.width, intrinsic.width), (vars.height, intrinsic.height)] {
                let hugging = config.content_hugging;
                system.add(bound(size, RelationalOperator::LessOrEqual, value, hugging))?;
                system.add(bound(
                    size,
                    RelationalOperator::GreaterOrEqual,
                    value,
                    config.compression_resistance,
                ))?;
            }
        }

        let frame = tree.frame(view).unwrap_or_default();
        let preference = config.frame_preference;
        system.add(bound(vars.width, RelationalOperator::Equal, frame.width, preference))?;
        system.add(bound(vars.height, RelationalOperator::Equal, frame.height, preference))?;
        if let Some(parent) = tree.parent(view) {
            let origin = system.vars(parent)?;
            system.add(offset_from(vars.x, origin.x, frame.x, preference))?;
            system.add(offset_from(vars.y, origin.y, frame.y, preference))?;
        }
    }

    // Write back in parent coordinates.
    for &view in &views {
        let vars = system.vars(view)?;
        let (origin_x, origin_y) = match tree.parent(view) {
            Some(parent) => {
                let origin = system.vars(parent)?;
                (system.value(origin.x), system.value(origin.y))
            }
            None => (0.0, 0.0),
        };
        let frame = Frame::new(
            system.value(vars.x) - origin_x,
            system.value(vars.y) - origin_y,
            system.value(vars.width),
            system.value(vars.height),
        );
        tree.set_frame(view, frame);
    }

    tracing::debug!(
        views = views.len(),
        constraints = tree.constraint_count(),
        broken = resolution.broken.len(),
        "layout resolved"
    );
    Ok(resolution)
}
