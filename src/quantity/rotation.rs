quantity!(Rpm, i64, " RPM");
