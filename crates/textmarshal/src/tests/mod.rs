mod property_round_trip;
