quantity!(Cycles, i64, " cycles");
