use protocol::RiskTier;

pub const MODERATE_FROM: u32 = 25;
pub const HIGHER_FROM: u32 = 50;

pub fn classify(score: u32) -> RiskTier {
    match score {
        s if s < MODERATE_FROM => RiskTier::Low,
        s if s < HIGHER_FROM => RiskTier::Moderate,
        _ => RiskTier::Higher,
    }
}
