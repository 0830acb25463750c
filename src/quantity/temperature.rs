quantity!(Celsius, f64, "°C");
