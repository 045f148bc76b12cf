use std::ops::Mul;

use crate::units::{energy::KilowattHours, power::Kilowatts, thermal::MegaBtu};

quantity!(Dollars, "$", 2);
quantity!(DollarsPerKilowattHour, "$/kWh", 3);
quantity!(DollarsPerMegaBtu, "$/MMBtu", 2);
quantity!(DollarsPerKilowatt, "$/kW", 2);

impl Mul<DollarsPerKilowattHour> for KilowattHours {
    type Output = Dollars;

    fn mul(self, rate: DollarsPerKilowattHour) -> Self::Output {
        Dollars(self.0 * rate.0)
    }
}

impl Mul<DollarsPerMegaBtu> for MegaBtu {
    type Output = Dollars;

    fn mul(self, rate: DollarsPerMegaBtu) -> Self::Output {
        Dollars(self.0 * rate.0)
    }
}

impl Mul<DollarsPerKilowatt> for Kilowatts {
    type Output = Dollars;

    fn mul(self, rate: DollarsPerKilowatt) -> Self::Output {
        Dollars(self.0 * rate.0)
    }
}
