//=========================================================================
// Trigonometric Lookup Table
//=========================================================================
//
// 1024-step fixed-point sine table, filled once at startup.
//
// Angles are in table steps (1024 per turn) and wrap; values carry
// `FIXED_SHIFT` fractional bits, so 1.0 == 1024.
//
//=========================================================================

//=== Constants ===========================================================

/// Fixed-point number with `FIXED_SHIFT` fractional bits.
pub type Fixed = i32;

pub const FIXED_SHIFT: u32 = 10;

/// Table entries per full turn.
pub const TRIG_STEPS: usize = 1024;

const QUARTER_TURN: i32 = (TRIG_STEPS / 4) as i32;

//=== TrigTable ===========================================================

/// Immutable sine lookup table.
pub struct TrigTable {
    sin: Box<[Fixed; TRIG_STEPS]>,
}

impl TrigTable {
    pub fn new() -> Self {
        let mut sin = Box::new([0; TRIG_STEPS]);

        for (step, value) in sin.iter_mut().enumerate() {
            let angle = 2.0 * std::f32::consts::PI * step as f32 / TRIG_STEPS as f32;
            *value = (angle.sin() * (1 << FIXED_SHIFT) as f32) as Fixed;
        }

        Self { sin }
    }

    pub fn sin(&self, angle: i32) -> Fixed {
        self.sin[(angle & (TRIG_STEPS as i32 - 1)) as usize]
    }

    pub fn cos(&self, angle: i32) -> Fixed {
        self.sin(angle.wrapping_add(QUARTER_TURN))
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
