mod space_tests;
