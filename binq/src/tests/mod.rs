mod stress;
